//! Sanitized value model for descriptor records.
//!
//! This module provides the data types that come out of the parse pipeline:
//!
//! - [`Value`]: a single sanitized token, either a string or a number
//! - [`Number`]: an integer or float, coerced from a raw token by [`Number::coerce`]
//! - [`Occurrence`]: tags a key's data as appearing once or several times in a block
//! - [`Field`]: the value side of a record entry, either a boolean flag or data
//!
//! ## Occurrences
//!
//! Some descriptor keys legally repeat within one block (each line carrying an
//! alternative value tuple). Rather than re-inferring "is this a list of lists"
//! from the data shape, the distinction is made explicit at aggregation time and
//! carried in the type:
//!
//! ```rust
//! use descr_unit::{Occurrence, Value};
//!
//! let single = Occurrence::Single(vec![Value::from("germans")]);
//! let repeated = Occurrence::Multiple(vec![
//!     vec![Value::from("germans")],
//!     vec![Value::from("dacians")],
//! ]);
//!
//! assert_eq!(single.len(), 1);
//! assert_eq!(repeated.len(), 2);
//! ```
//!
//! ## Flags
//!
//! A key with no values at all (e.g. `is_female` on its own line) encodes a
//! boolean `true`; the key's absence encodes `false`. This is [`Field::Flag`]:
//!
//! ```rust
//! use descr_unit::Field;
//!
//! assert!(Field::Flag.is_flag());
//! ```

use serde::Serialize;
use std::fmt;

/// A numeric value coerced from a raw descriptor token.
///
/// Tokens that look like integers stay integers so they render back without a
/// fractional part; everything else numeric becomes a float.
///
/// # Examples
///
/// ```rust
/// use descr_unit::Number;
///
/// assert_eq!(Number::coerce("12"), Some(Number::Integer(12)));
/// assert_eq!(Number::coerce("1.5"), Some(Number::Float(1.5)));
/// assert_eq!(Number::coerce("abc"), None);
/// assert_eq!(Number::coerce(""), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Attempts numeric coercion of a raw token.
    ///
    /// A token is numeric if it is non-empty and matches a signed decimal
    /// literal: optional leading sign, digits, at most one decimal point, and
    /// an optional exponent. Anything else, including the empty token and
    /// literals that overflow to infinity, is left for the caller to keep as
    /// a string.
    ///
    /// Coercion is canonicalizing: a float literal with a zero fraction that
    /// fits `i64` becomes an `Integer`, so `"1.0"` and `"1"` coerce to the
    /// same value and a document using either spelling round-trips to the
    /// same record.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use descr_unit::Number;
    ///
    /// assert_eq!(Number::coerce("-3"), Some(Number::Integer(-3)));
    /// assert_eq!(Number::coerce("1.0"), Some(Number::Integer(1)));
    /// assert_eq!(Number::coerce("1e3"), Some(Number::Integer(1000)));
    /// assert_eq!(Number::coerce("1.2.3"), None);
    /// assert_eq!(Number::coerce("Infinity"), None);
    /// ```
    #[must_use]
    pub fn coerce(token: &str) -> Option<Number> {
        if !is_numeric_literal(token) {
            return None;
        }
        if let Ok(integer) = token.parse::<i64>() {
            return Some(Number::Integer(integer));
        }
        let float = token.parse::<f64>().ok().filter(|f| f.is_finite())?;
        match Number::Float(float).as_i64() {
            Some(integer) => Some(Number::Integer(integer)),
            None => Some(Number::Float(float)),
        }
    }

    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use descr_unit::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`. Always succeeds.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            // Coercion canonicalizes in-range zero-fraction floats away, but
            // values past i64 range (or mutated in by a caller) still render
            // without a spurious fractional part.
            Number::Float(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{n:.0}"),
            Number::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Number::Integer(i)
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

/// Checks the shape of a signed decimal/float literal: optional sign, digits
/// with at most one decimal point, optional exponent. At least one mantissa
/// digit is required, so "", ".", "-" and "e5" all fail.
fn is_numeric_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let mut digits = 0;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_dot => seen_dot = true,
            b'e' | b'E' => break,
            _ => return false,
        }
        i += 1;
    }
    if digits == 0 {
        return false;
    }
    if i == bytes.len() {
        return true;
    }
    // Exponent part: e/E already seen, then optional sign and at least one digit.
    i += 1;
    if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    i < bytes.len() && bytes[i..].iter().all(u8::is_ascii_digit)
}

/// A single sanitized value: a raw string token, or a number where coercion
/// applied.
///
/// # Examples
///
/// ```rust
/// use descr_unit::Value;
///
/// let name = Value::from("roman_hastati");
/// let count = Value::from(40);
///
/// assert_eq!(name.as_str(), Some("roman_hastati"));
/// assert_eq!(count.as_i64(), Some(40));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Number(Number),
}

impl Value {
    /// Sanitizes one raw token: numeric coercion where it applies, string
    /// otherwise.
    #[must_use]
    pub fn sanitize(token: String) -> Value {
        match Number::coerce(&token) {
            Some(number) => Value::Number(number),
            None => Value::String(token),
        }
    }

    /// Returns `true` if this value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns the string slice if this value is a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Number(_) => None,
        }
    }

    /// Returns the number if this value is numeric.
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            Value::String(_) => None,
        }
    }

    /// Shorthand for `as_number().and_then(|n| n.as_i64())`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    /// Shorthand for `as_number().map(|n| n.as_f64())`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Number(n) => n.fmt(f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

/// Data for a key that appeared once (`Single`) or several times (`Multiple`)
/// within one block.
///
/// Within `Multiple`, every element is non-empty: the aggregator rejects blocks
/// where a repeated key mixes empty and non-empty value lists before an
/// `Occurrence` is ever built.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Occurrence<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> Occurrence<T> {
    /// The number of occurrences (1 for `Single`).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Occurrence::Single(_) => 1,
            Occurrence::Multiple(all) => all.len(),
        }
    }

    /// Returns `true` if there are no occurrences. A `Multiple` never ends up
    /// empty in practice, but the predicate keeps the API honest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for the multi-occurrence shape.
    #[inline]
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Occurrence::Multiple(_))
    }

    /// The first occurrence in original order.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        match self {
            Occurrence::Single(one) => Some(one),
            Occurrence::Multiple(all) => all.first(),
        }
    }

    /// Iterates occurrences in original order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        match self {
            Occurrence::Single(one) => std::slice::from_ref(one).iter(),
            Occurrence::Multiple(all) => all.iter(),
        }
    }

    /// Iterates occurrences mutably, in original order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        match self {
            Occurrence::Single(one) => std::slice::from_mut(one).iter_mut(),
            Occurrence::Multiple(all) => all.iter_mut(),
        }
    }
}

/// The value side of one record entry.
///
/// `Flag` is the marker left by a key that carried no values (boolean `true`;
/// the key's absence from the record encodes `false`). `Data` carries the
/// sanitized value lists, one per occurrence.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Flag,
    Data(Occurrence<Vec<Value>>),
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // The flag marker exports as the boolean it stands for.
            Field::Flag => serializer.serialize_bool(true),
            Field::Data(occurrence) => occurrence.serialize(serializer),
        }
    }
}

impl Field {
    /// Returns `true` if this field is the boolean flag marker.
    #[inline]
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        matches!(self, Field::Flag)
    }

    /// Returns the data occurrences, if any.
    #[inline]
    #[must_use]
    pub fn as_data(&self) -> Option<&Occurrence<Vec<Value>>> {
        match self {
            Field::Data(occurrence) => Some(occurrence),
            Field::Flag => None,
        }
    }

    /// Returns the data occurrences mutably, if any.
    ///
    /// This is the write side of the mutation surface: patch code reads a
    /// value, computes a replacement, and writes it back in place.
    #[inline]
    #[must_use]
    pub fn as_data_mut(&mut self) -> Option<&mut Occurrence<Vec<Value>>> {
        match self {
            Field::Data(occurrence) => Some(occurrence),
            Field::Flag => None,
        }
    }

    /// The value list of a single-occurrence data field.
    #[must_use]
    pub fn values(&self) -> Option<&[Value]> {
        match self {
            Field::Data(Occurrence::Single(values)) => Some(values),
            _ => None,
        }
    }

    /// The value list of a single-occurrence data field, mutably.
    #[must_use]
    pub fn values_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Field::Data(Occurrence::Single(values)) => Some(values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_integers_and_floats() {
        assert_eq!(Number::coerce("12"), Some(Number::Integer(12)));
        assert_eq!(Number::coerce("+12"), Some(Number::Integer(12)));
        assert_eq!(Number::coerce("-7"), Some(Number::Integer(-7)));
        assert_eq!(Number::coerce("1.5"), Some(Number::Float(1.5)));
        assert_eq!(Number::coerce("-0.25"), Some(Number::Float(-0.25)));
        assert_eq!(Number::coerce("1.5E-1"), Some(Number::Float(0.15)));
    }

    #[test]
    fn coerce_canonicalizes_zero_fraction_floats() {
        // "1.0" and "1" must coerce to the same value, or a record written
        // with either spelling would not survive a round trip unchanged.
        assert_eq!(Number::coerce("1.0"), Some(Number::Integer(1)));
        assert_eq!(Number::coerce("1.0"), Number::coerce("1"));
        assert_eq!(Number::coerce("-3.00"), Some(Number::Integer(-3)));
        assert_eq!(Number::coerce("2e2"), Some(Number::Integer(200)));
        assert_eq!(Number::coerce("-0.0"), Some(Number::Integer(0)));
        // Out of i64 range, the float shape survives (and still renders
        // without a fractional part).
        assert_eq!(Number::coerce("1e20"), Some(Number::Float(1e20)));
    }

    #[test]
    fn coerce_rejects_overflowing_literals() {
        // "1e999" parses to infinity, which would write back as "inf" and
        // never re-coerce; keeping it a string keeps the failure mode the
        // same on every parse.
        assert_eq!(Number::coerce("1e999"), None);
        assert_eq!(Number::coerce("-1e999"), None);
    }

    #[test]
    fn coerce_rejects_non_numbers() {
        assert_eq!(Number::coerce(""), None);
        assert_eq!(Number::coerce("abc"), None);
        assert_eq!(Number::coerce("1.2.3"), None);
        assert_eq!(Number::coerce("12abc"), None);
        assert_eq!(Number::coerce("-"), None);
        assert_eq!(Number::coerce("."), None);
        assert_eq!(Number::coerce("1e"), None);
        assert_eq!(Number::coerce("e5"), None);
        assert_eq!(Number::coerce("NaN"), None);
        assert_eq!(Number::coerce("Infinity"), None);
    }

    #[test]
    fn number_display_drops_zero_fraction() {
        assert_eq!(Number::Integer(42).to_string(), "42");
        assert_eq!(Number::Float(1.0).to_string(), "1");
        assert_eq!(Number::Float(1.2).to_string(), "1.2");
        assert_eq!(Number::Float(-3.0).to_string(), "-3");
    }

    #[test]
    fn sanitize_token() {
        assert_eq!(Value::sanitize("40".to_string()), Value::from(40));
        assert_eq!(Value::sanitize("square".to_string()), Value::from("square"));
        // The empty token is never coerced.
        assert_eq!(Value::sanitize(String::new()), Value::from(""));
    }

    #[test]
    fn occurrence_iteration_order() {
        let occurrence = Occurrence::Multiple(vec![vec![Value::from(1)], vec![Value::from(2)]]);
        let seen: Vec<_> = occurrence.iter().collect();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0][0], Value::from(1));
        assert_eq!(seen[1][0], Value::from(2));
    }

    #[test]
    fn field_mutation_surface() {
        let mut field = Field::Data(Occurrence::Single(vec![Value::from(1), Value::from(320)]));
        if let Some(values) = field.values_mut() {
            values[1] = Value::from(400);
        }
        assert_eq!(field.values().unwrap()[1], Value::from(400));
    }
}

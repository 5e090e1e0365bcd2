//! The validated unit-descriptor record.
//!
//! This module provides [`Record`], an ordered map from the checklist's static
//! key names to [`Field`] values. A `Record` is only ever built by validation,
//! so its structure (which keys are present, with what arity) honours the
//! checklist; the individual values stay freely mutable so patch code can
//! adjust them in place before serialization.
//!
//! ## Why IndexMap?
//!
//! Records use [`IndexMap`] instead of `HashMap` so iteration follows the
//! checklist order the validator inserted in, which keeps debug output and
//! JSON exports deterministic. (Serialization itself walks the checklist and
//! does not depend on record iteration order.)
//!
//! ## Examples
//!
//! ```rust
//! use descr_unit::{parse, Value};
//!
//! let document = "\
//! type             roman hastati
//! dictionary       roman_hastati
//! category         infantry
//! class            light
//! voice_type       Light_1 roman
//! soldier          roman_hastati, 40, 0, 1.2
//! formation        1, 2, 2, 3, 4, square
//! stat_health      1, 0
//! stat_pri         7, 2, pilum, 35, 2, thrown, archery, spear, spear, 25, 1
//! stat_pri_attr    ap
//! stat_sec         11, 3, no, 0, 0, melee, simple, blade, short_pilum, 25, 1
//! stat_sec_attr    no
//! ";
//!
//! let output = parse(document);
//! let record = &output.records[0];
//! assert_eq!(record.first_value("type").and_then(Value::as_str), Some("roman hastati"));
//! ```

use crate::value::{Field, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// One validated unit descriptor: checklist keys mapped to their fields.
///
/// Built by the validator, mutated (values only) by collaborators, consumed by
/// the serializer. Keys never present in the checklist never appear here.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record(IndexMap<&'static str, Field>);

impl Record {
    /// Creates an empty record. Only validation ever fills one in.
    #[must_use]
    pub(crate) fn new() -> Self {
        Record(IndexMap::new())
    }

    /// Inserts a validated field. Crate-private: the key set of a record is
    /// fixed by the checklist at construction time.
    pub(crate) fn insert(&mut self, key: &'static str, field: Field) {
        self.0.insert(key, field);
    }

    /// Returns the field for `key`, if the key was present in the block.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.0.get(key)
    }

    /// Returns the field for `key` mutably.
    ///
    /// This is the entry point for patch code: look a field up, rewrite its
    /// values in place, serialize. No re-validation happens on writeout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use descr_unit::{Field, Record, Value};
    ///
    /// fn double_health(record: &mut Record) {
    ///     if let Some(values) = record.get_mut("stat_health").and_then(Field::values_mut) {
    ///         if let Some(hp) = values[0].as_i64() {
    ///             values[0] = Value::from(hp * 2);
    ///         }
    ///     }
    /// }
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Field> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the block carried `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Reads a flag key: `true` when the flag marker is present, `false` when
    /// the key is absent (or holds data).
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(Field::is_flag)
    }

    /// The first value of the first occurrence of `key`, the common case for
    /// single-occurrence keys like `type`.
    #[must_use]
    pub fn first_value(&self, key: &str) -> Option<&Value> {
        self.0
            .get(key)?
            .as_data()?
            .first()
            .and_then(|values| values.first())
    }

    /// The number of keys present in this record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the record has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the record's keys in checklist order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Iterates key/field pairs in checklist order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, &'static str, Field> {
        self.0.iter()
    }

    /// Iterates key/field pairs mutably (fields only; keys are fixed).
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, &'static str, Field> {
        self.0.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a &'static str, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, &'static str, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Record {
    type Item = (&'static str, Field);
    type IntoIter = indexmap::map::IntoIter<&'static str, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

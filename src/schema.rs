//! The descriptor checklist: per-key arity and type contracts.
//!
//! Every key the crate recognizes has a [`SchemaEntry`] describing its value
//! positions, in the same spirit as function parameters:
//!
//! - `required` positions must all be present, each matching its declared type
//! - `optional` positions are checked when present, never demanded
//! - a `rest` type, when declared, covers any number of trailing values
//!
//! The checklist is a process-lifetime static in canonical key order, which is
//! also the order the serializer writes keys in. Validation walks it entry by
//! entry against a sanitized block and either builds a [`Record`] or stops at
//! the first failure with a [`Diagnostic`].
//!
//! Keys present in a block but missing from the checklist are dropped: they
//! are neither validated nor carried into the record, so unknown keys do not
//! survive a parse/serialize round trip.

use crate::error::{Diagnostic, Result};
use crate::record::Record;
use crate::value::{Field, Value};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// The declared type of one value position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ValueType {
    /// A non-empty string token.
    Str,
    /// A token that passed numeric coercion.
    Num,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Str => f.write_str("string"),
            ValueType::Num => f.write_str("number"),
        }
    }
}

/// The contract for one descriptor key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SchemaEntry {
    /// The key as it appears at the start of a line.
    pub key: &'static str,
    /// Types of the positions every occurrence must carry, in order.
    pub required: &'static [ValueType],
    /// Types of trailing positions that may be present, in order.
    pub optional: &'static [ValueType],
    /// Type covering values past the required and optional positions. The
    /// presence of rest values implies all optional positions are filled.
    pub rest: Option<ValueType>,
    /// Whether the key may be missing from a block entirely.
    pub may_be_absent: bool,
    /// Whether the key is flag-only: its bare presence means `true` and it
    /// never carries values.
    pub flag: bool,
}

impl SchemaEntry {
    const fn data(
        key: &'static str,
        required: &'static [ValueType],
        optional: &'static [ValueType],
        rest: Option<ValueType>,
        may_be_absent: bool,
    ) -> Self {
        SchemaEntry {
            key,
            required,
            optional,
            rest,
            may_be_absent,
            flag: false,
        }
    }

    const fn flag(key: &'static str) -> Self {
        SchemaEntry {
            key,
            required: &[],
            optional: &[],
            rest: None,
            may_be_absent: true,
            flag: true,
        }
    }
}

use ValueType::{Num, Str};

/// Both weapon stat lines share one layout: damage, charge bonus, missile,
/// range, ammunition, weapon type, tech type, damage type, sound, and the two
/// attack delays.
const WEAPON_STAT: &[ValueType] = &[
    Num, Num, Str, Num, Num, Str, Str, Str, Str, Num, Num,
];

/// The checklist, in canonical serialization order.
///
/// The trailing six `stat_*` entries are marked absent-ok: historic documents
/// omit them and still have to parse.
static CHECKLIST: &[SchemaEntry] = &[
    SchemaEntry::data("type", &[Str], &[], None, false),
    SchemaEntry::data("dictionary", &[Str], &[], None, false),
    SchemaEntry::data("category", &[Str], &[], None, false),
    SchemaEntry::data("class", &[Str], &[], None, false),
    SchemaEntry::data("voice_type", &[Str], &[], None, false),
    SchemaEntry::data("voice_indexes", &[], &[Str], None, true),
    SchemaEntry::data("soldier", &[Str, Num, Num, Num], &[], None, false),
    SchemaEntry::data("attributes", &[], &[], Some(Str), true),
    SchemaEntry::data("formation", &[Num, Num, Num, Num, Num, Str], &[Str], None, false),
    SchemaEntry::data("stat_health", &[Num, Num], &[], None, false),
    SchemaEntry::data("stat_pri", WEAPON_STAT, &[], None, false),
    SchemaEntry::data("stat_pri_attr", &[Str], &[], Some(Str), false),
    SchemaEntry::data("stat_sec", WEAPON_STAT, &[], None, false),
    SchemaEntry::data("stat_sec_attr", &[Str], &[], Some(Str), false),
    SchemaEntry::data("stat_pri_armour", &[Num, Num, Num, Str], &[], None, true),
    SchemaEntry::data("stat_sec_armour", &[Num, Num, Str], &[], None, true),
    SchemaEntry::data("stat_heat", &[Num], &[], None, true),
    SchemaEntry::data("stat_ground", &[Num, Num, Num, Num], &[], None, true),
    SchemaEntry::data("stat_mental", &[Num, Str, Str], &[], None, true),
    SchemaEntry::data("stat_charge_dist", &[Num], &[], None, true),
    SchemaEntry::flag("is_female"),
];

/// The full checklist in canonical key order.
///
/// # Examples
///
/// ```rust
/// use descr_unit::checklist;
///
/// let first = &checklist()[0];
/// assert_eq!(first.key, "type");
/// assert_eq!(checklist().last().unwrap().key, "is_female");
/// ```
#[must_use]
pub fn checklist() -> &'static [SchemaEntry] {
    CHECKLIST
}

/// Looks up the checklist entry for `key`.
#[must_use]
pub fn entry(key: &str) -> Option<&'static SchemaEntry> {
    CHECKLIST.iter().find(|entry| entry.key == key)
}

/// Checks a sanitized block against the checklist and builds the record.
///
/// Walks the checklist in order; the first failed entry rejects the whole
/// block. Fields for keys outside the checklist are discarded.
pub(crate) fn validate(mut fields: IndexMap<String, Field>) -> Result<Record> {
    let mut record = Record::new();
    for entry in CHECKLIST {
        let Some(field) = fields.swap_remove(entry.key) else {
            if entry.may_be_absent {
                continue;
            }
            return Err(Diagnostic::missing_required_value(
                entry.key,
                entry.required.len(),
                0,
            ));
        };

        if entry.flag {
            if !field.is_flag() {
                return Err(Diagnostic::expected_boolean_flag(entry.key));
            }
            record.insert(entry.key, Field::Flag);
            continue;
        }

        let occurrence = match field {
            Field::Data(occurrence) => occurrence,
            Field::Flag => {
                if entry.required.is_empty() {
                    // A bare line for a key with no required positions. Nothing
                    // to keep; the key round-trips as absent.
                    continue;
                }
                return Err(Diagnostic::unexpected_empty_data(entry.key));
            }
        };

        for values in occurrence.iter() {
            check_occurrence(entry, values)?;
        }
        record.insert(entry.key, Field::Data(occurrence));
    }
    Ok(record)
}

/// Checks one occurrence's value list against an entry's positions.
fn check_occurrence(entry: &SchemaEntry, values: &[Value]) -> Result<()> {
    if values.len() < entry.required.len() {
        return Err(Diagnostic::missing_required_value(
            entry.key,
            entry.required.len(),
            values.len(),
        ));
    }
    for (position, expected) in entry.required.iter().enumerate() {
        check_value(entry.key, position, *expected, &values[position])?;
    }

    let optional_from = entry.required.len();
    for (offset, expected) in entry.optional.iter().enumerate() {
        match values.get(optional_from + offset) {
            Some(value) => check_value(entry.key, optional_from + offset, *expected, value)?,
            None => break,
        }
    }

    let rest_from = optional_from + entry.optional.len();
    for (position, value) in values.iter().enumerate().skip(rest_from) {
        match entry.rest {
            Some(expected) => check_value(entry.key, position, expected, value)?,
            None => {
                return Err(Diagnostic::invalid_value_type(
                    entry.key,
                    position,
                    "no further values",
                    &describe(value),
                ));
            }
        }
    }
    Ok(())
}

/// Checks one value against its declared position type. The empty string token
/// is never valid, whatever the declared type.
fn check_value(key: &str, position: usize, expected: ValueType, value: &Value) -> Result<()> {
    let ok = match (expected, value) {
        (ValueType::Num, Value::Number(_)) => true,
        (ValueType::Str, Value::String(s)) => !s.is_empty(),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(Diagnostic::invalid_value_type(
            key,
            position,
            &expected.to_string(),
            &describe(value),
        ))
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "empty token".to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Number(n) => format!("number {n}"),
    }
}

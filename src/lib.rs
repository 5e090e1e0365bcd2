//! # descr_unit
//!
//! Parser, schema validator and serializer for the `export_descr_unit` (EDU)
//! unit-descriptor format.
//!
//! ## What is the descriptor format?
//!
//! A line-oriented text format describing unit records: blank-line-delimited
//! blocks, `;` comments, and per line a key followed by comma-separated
//! values. Some keys are boolean flags with no values, some legally repeat
//! within a block, and every recognized key has a positional type contract.
//! See the [`format`] module for the full syntax.
//!
//! ## Key features
//!
//! - **Total parsing**: [`parse`] never fails at the document level; invalid
//!   blocks become [`Diagnostic`]s and the rest of the document still parses
//! - **Schema-checked records**: every [`Record`] honours the static
//!   [`checklist`] of required/optional/rest positions
//! - **Mutable in place**: records expose their values for patch code to
//!   rewrite before writeout
//! - **Canonical writeout**: [`serialize`] renders checklist-ordered,
//!   column-aligned text regardless of the source layout
//! - **No unsafe code**: written entirely in safe Rust
//!
//! ## Quick start
//!
//! ```rust
//! use descr_unit::{parse, serialize, Field, Value};
//!
//! let document = "\
//! ; barbarian chosen swordsmen
//! type             barb chosen swordsmen
//! dictionary       barb_chosen_swordsmen
//! category         infantry
//! class            heavy
//! voice_type       Heavy_1 barbarian
//! soldier          chosen_swordsmen, 40, 0, 1.2
//! attributes       sea_faring, hide_forest, warcry
//! formation        1.2, 1.5, 2.4, 3, 5, square
//! stat_health      1, 0
//! stat_pri         10, 6, no, 0, 0, melee, simple, slashing, sword, 25, 1
//! stat_pri_attr    no
//! stat_sec         11, 3, no, 0, 0, melee, simple, blade, none, 25, 1
//! stat_sec_attr    no
//! ";
//!
//! let mut output = parse(document);
//! assert_eq!(output.records.len(), 1);
//! assert!(output.diagnostics.is_empty());
//!
//! // Patch a value in place, then write back out.
//! let record = &mut output.records[0];
//! if let Some(values) = record.get_mut("stat_health").and_then(Field::values_mut) {
//!     values[0] = Value::from(2);
//! }
//!
//! let text = serialize(&output.records);
//! assert!(text.contains("stat_health      2, 0"));
//! ```
//!
//! ## Error handling
//!
//! Rejected blocks do not abort the parse:
//!
//! ```rust
//! use descr_unit::{parse, Diagnostic};
//!
//! // Second block is missing almost everything.
//! let output = parse("type x\n\ntype y\ndictionary y\n");
//! assert!(output.records.is_empty());
//! assert_eq!(output.diagnostics.len(), 2);
//! assert!(matches!(
//!     output.diagnostics[0].diagnostic,
//!     Diagnostic::MissingRequiredValue { .. }
//! ));
//! ```
//!
//! ## Concurrency
//!
//! Parsing and serialization are pure functions of their input with no shared
//! mutable state; the checklist is immutable `'static` data. Documents may be
//! processed on any number of threads with no coordination.
//!
//! ## Limitations
//!
//! - Keys absent from the [`checklist`] are dropped during validation and do
//!   not round-trip
//! - [`serialize`] trusts its input: values mutated outside the checklist's
//!   contract produce out-of-contract text rather than an error
//! - The whole document is processed as one in-memory string; there is no
//!   streaming mode

pub mod de;
pub mod error;
pub mod format;
pub mod options;
pub mod record;
pub mod schema;
pub mod ser;
pub mod value;

pub use de::ParseOutput;
pub use error::{BlockDiagnostic, Diagnostic, Result};
pub use options::{FormatOptions, DEFAULT_KEY_COLUMN};
pub use record::Record;
pub use schema::{checklist, SchemaEntry, ValueType};
pub use value::{Field, Number, Occurrence, Value};

/// Parses a descriptor document into validated records plus per-block
/// diagnostics.
///
/// Never fails at document level: an empty or fully invalid document yields
/// an empty record list and a (possibly empty) diagnostic list.
///
/// # Examples
///
/// ```rust
/// use descr_unit::parse;
///
/// let output = parse("");
/// assert!(output.records.is_empty());
/// assert!(output.diagnostics.is_empty());
/// ```
#[must_use]
pub fn parse(input: &str) -> ParseOutput {
    de::parse_document(input)
}

/// Serializes records to canonical descriptor text.
///
/// Total and trusting: nothing is validated, and out-of-contract values
/// simply produce out-of-contract text.
///
/// # Examples
///
/// ```rust
/// use descr_unit::{parse, serialize};
///
/// let records = parse("").records;
/// assert_eq!(serialize(&records), "");
/// ```
#[must_use]
pub fn serialize(records: &[Record]) -> String {
    serialize_with_options(records, FormatOptions::default())
}

/// Serializes records with explicit [`FormatOptions`].
///
/// # Examples
///
/// ```rust
/// use descr_unit::{serialize_with_options, FormatOptions, Record};
///
/// let records: Vec<Record> = Vec::new();
/// let options = FormatOptions::new().with_key_column(24);
/// assert_eq!(serialize_with_options(&records, options), "");
/// ```
#[must_use]
pub fn serialize_with_options(records: &[Record], options: FormatOptions) -> String {
    ser::write_document(records, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAIDERS: &str = "\
type             night raiders
dictionary       night_raiders
category         infantry
class            light
voice_type       Light_1 barbarian
soldier          naked_fanatics_dacian, 40, 0, 1
attributes       sea_faring, hide_improved_forest, frighten_foot, warcry
formation        1.2, 1.5, 2.4, 3, 4, square
stat_health      1, 0
stat_pri         7, 4, no, 0, 0, melee, simple, piercing, knife, 25, 1
stat_pri_attr    no
stat_sec         11, 3, no, 0, 0, melee, simple, blade, none, 25, 1
stat_sec_attr    no
is_female
";

    #[test]
    fn parse_then_serialize_is_stable() {
        let first = parse(RAIDERS);
        assert!(first.diagnostics.is_empty());
        let text = serialize(&first.records);
        let second = parse(&text);
        assert_eq!(first.records, second.records);
        // And the canonical text is a fixed point.
        assert_eq!(serialize(&second.records), text);
    }

    #[test]
    fn flags_read_back() {
        let output = parse(RAIDERS);
        assert!(output.records[0].flag("is_female"));
        assert!(!output.records[0].flag("command"));
    }

    #[test]
    fn mutate_and_write_back() {
        let mut output = parse(RAIDERS);
        let values = output.records[0]
            .get_mut("stat_health")
            .and_then(Field::values_mut)
            .unwrap();
        values[0] = Value::from(3);
        let text = serialize(&output.records);
        assert!(text.contains("stat_health      3, 0"));
    }

    #[test]
    fn records_export_as_json() {
        let output = parse(RAIDERS);
        let json = serde_json::to_value(&output.records[0]).unwrap();
        assert_eq!(json["type"][0], "night raiders");
        assert_eq!(json["stat_health"][0], 1);
        assert_eq!(json["is_female"], true);
    }

    #[test]
    fn diagnostics_export_as_json() {
        let output = parse("type x\n");
        let json = serde_json::to_string(&output.diagnostics).unwrap();
        assert!(json.contains("MissingRequiredValue"));
    }
}

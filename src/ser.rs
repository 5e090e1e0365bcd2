//! Serialization: records back to descriptor text.
//!
//! The writer is the structural inverse of the parse pipeline for any record
//! that was never mutated outside its type contract. Keys come out in
//! checklist order, not in the order the source document happened to use:
//!
//! - a flag marker emits the bare key on its own line
//! - a data field emits one line per occurrence, the key padded to the key
//!   column, values joined with `", "`
//! - absent keys (including absent flags) emit nothing, as does a data field
//!   whose value list was emptied
//!
//! Records are joined with exactly one blank line and lines always end in
//! `\n`, whatever the parsed document used. No validation is re-run: values
//! written outside the checklist's contract simply produce out-of-contract
//! text.

use crate::options::FormatOptions;
use crate::record::Record;
use crate::schema;
use crate::value::Field;

/// Serializes records with the given options. See [`crate::serialize`].
pub(crate) fn write_document(records: &[Record], options: FormatOptions) -> String {
    let mut output = String::with_capacity(records.len() * 512);
    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            output.push_str("\n\n");
        }
        write_record(&mut output, record, options);
    }
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

fn write_record(output: &mut String, record: &Record, options: FormatOptions) {
    let mut first_line = true;
    for entry in schema::checklist() {
        let Some(field) = record.get(entry.key) else {
            continue;
        };
        match field {
            Field::Flag => {
                begin_line(output, &mut first_line);
                output.push_str(entry.key);
            }
            Field::Data(occurrence) => {
                for values in occurrence.iter() {
                    // An emptied value list is the `false`-equivalent of a
                    // flag: nothing to write.
                    if values.is_empty() {
                        continue;
                    }
                    begin_line(output, &mut first_line);
                    pad_key(output, entry.key, options.key_column);
                    for (position, value) in values.iter().enumerate() {
                        if position > 0 {
                            output.push_str(", ");
                        }
                        output.push_str(&value.to_string());
                    }
                }
            }
        }
    }
}

fn begin_line(output: &mut String, first_line: &mut bool) {
    if *first_line {
        *first_line = false;
    } else {
        output.push('\n');
    }
}

/// Writes the key padded with spaces up to the key column. A key already at
/// or past the column gets no trailing separator, matching the historic
/// pad-to-width writeout.
fn pad_key(output: &mut String, key: &str, column: usize) {
    output.push_str(key);
    for _ in key.len()..column {
        output.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Occurrence, Value};

    fn record_with(key: &'static str, field: Field) -> Record {
        let mut record = Record::new();
        record.insert(key, field);
        record
    }

    #[test]
    fn pads_key_to_column() {
        let record = record_with(
            "type",
            Field::Data(Occurrence::Single(vec![Value::from("night raiders")])),
        );
        let text = write_document(&[record], FormatOptions::default());
        // 4-character key, column 17: exactly 13 spaces of padding.
        assert_eq!(text, format!("type{}night raiders\n", " ".repeat(13)));
    }

    #[test]
    fn flag_emits_bare_key() {
        let record = record_with("is_female", Field::Flag);
        assert_eq!(
            write_document(&[record], FormatOptions::default()),
            "is_female\n"
        );
    }

    #[test]
    fn multiple_occurrences_emit_one_line_each() {
        let record = record_with(
            "stat_pri_attr",
            Field::Data(Occurrence::Multiple(vec![
                vec![Value::from("ap")],
                vec![Value::from("bp"), Value::from("area")],
            ])),
        );
        let text = write_document(&[record], FormatOptions::default());
        assert_eq!(text, "stat_pri_attr    ap\nstat_pri_attr    bp, area\n");
    }

    #[test]
    fn emptied_value_list_emits_nothing() {
        let record = record_with("attributes", Field::Data(Occurrence::Single(vec![])));
        assert_eq!(write_document(&[record], FormatOptions::default()), "");
    }

    #[test]
    fn records_join_with_one_blank_line() {
        let a = record_with("is_female", Field::Flag);
        let b = record_with(
            "type",
            Field::Data(Occurrence::Single(vec![Value::from("b")])),
        );
        let text = write_document(&[a, b], FormatOptions::default());
        assert_eq!(text, format!("is_female\n\ntype{}b\n", " ".repeat(13)));
    }

    #[test]
    fn keys_follow_checklist_order_not_insertion_order() {
        let mut record = Record::new();
        record.insert("is_female", Field::Flag);
        record.insert(
            "type",
            Field::Data(Occurrence::Single(vec![Value::from("a")])),
        );
        let text = write_document(&[record], FormatOptions::default());
        assert!(text.starts_with("type"));
        assert!(text.ends_with("is_female\n"));
    }
}

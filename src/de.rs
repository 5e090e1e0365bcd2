//! Parsing: document text to validated records.
//!
//! The pipeline is a single synchronous pass with four stages per block:
//!
//! 1. **Split**: normalize line endings, strip `;` comments, trim, and cut the
//!    document into blank-line-delimited blocks
//! 2. **Lines**: split each line at the first whitespace run into a key and
//!    comma-separated raw tokens
//! 3. **Aggregate**: fold repeated keys into [`Occurrence`]s, first-seen order,
//!    rejecting flag/data mixes
//! 4. **Sanitize + validate**: coerce tokens to numbers, turn valueless keys
//!    into flag markers, and check the result against the checklist
//!
//! Blocks are independent: one bad block becomes one diagnostic and the rest
//! of the document still parses.
//!
//! ## Usage
//!
//! Most users should use [`crate::parse`]:
//!
//! ```rust
//! use descr_unit::parse;
//!
//! let output = parse("; an empty document, comments only\n");
//! assert!(output.records.is_empty());
//! assert!(output.diagnostics.is_empty());
//! ```

use crate::error::{BlockDiagnostic, Diagnostic, Result};
use crate::record::Record;
use crate::schema;
use crate::value::{Field, Occurrence, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// The outcome of parsing one document: validated records plus one diagnostic
/// per rejected block.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParseOutput {
    /// Records for the blocks that passed validation, in document order.
    pub records: Vec<Record>,
    /// Diagnostics for the blocks that did not, in document order.
    pub diagnostics: Vec<BlockDiagnostic>,
}

/// Parses a whole document. See [`crate::parse`].
pub(crate) fn parse_document(input: &str) -> ParseOutput {
    let mut output = ParseOutput::default();
    for (block, text) in split_blocks(input).iter().enumerate() {
        match parse_block(text) {
            Ok(record) => output.records.push(record),
            Err(diagnostic) => output.diagnostics.push(BlockDiagnostic { block, diagnostic }),
        }
    }
    output
}

/// Normalizes the document and splits it into per-record blocks.
///
/// Carriage returns go first, then each line loses everything from the first
/// `;` and its surrounding whitespace. Runs of blank lines collapse into block
/// boundaries, so a document that normalizes to nothing yields zero blocks.
fn split_blocks(input: &str) -> Vec<String> {
    let input = input.replace('\r', "");
    let mut blocks = Vec::new();
    let mut current = String::new();
    for raw in input.lines() {
        let line = raw.split(';').next().unwrap_or_default().trim();
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Parses one block: lines, aggregation, sanitization, validation.
pub(crate) fn parse_block(block: &str) -> Result<Record> {
    let mut raw: IndexMap<String, Occurrence<Vec<String>>> = IndexMap::new();
    for line in block.lines() {
        let (key, tokens) = parse_line(line)?;
        aggregate(&mut raw, key, tokens)?;
    }
    let fields = raw
        .into_iter()
        .map(|(key, occurrence)| (key, sanitize(occurrence)))
        .collect();
    schema::validate(fields)
}

/// Splits one non-blank line into its key and trimmed raw tokens.
///
/// The key runs to the first whitespace; the remainder, if any, splits on
/// commas. A line with no key token is malformed (the splitter never produces
/// one, but the guard stays).
fn parse_line(line: &str) -> Result<(String, Vec<String>)> {
    let line = line.trim();
    let (key, remainder) = match line.find(char::is_whitespace) {
        Some(split) => (&line[..split], line[split..].trim_start()),
        None => (line, ""),
    };
    if key.is_empty() {
        return Err(Diagnostic::malformed_line(line));
    }
    let tokens = if remainder.is_empty() {
        Vec::new()
    } else {
        remainder.split(',').map(|t| t.trim().to_string()).collect()
    };
    Ok((key.to_string(), tokens))
}

/// Folds one raw line into the block's entry map.
///
/// First occurrence of a key stays `Single`; a second promotes it to
/// `Multiple` in original order. Repeating a key only works for data lines:
/// two bare flags are a duplicate, and a bare flag next to data is a mix,
/// whichever came first.
fn aggregate(
    entries: &mut IndexMap<String, Occurrence<Vec<String>>>,
    key: String,
    tokens: Vec<String>,
) -> Result<()> {
    let Some(existing) = entries.get_mut(&key) else {
        entries.insert(key, Occurrence::Single(tokens));
        return Ok(());
    };
    match existing {
        Occurrence::Single(first) => match (first.is_empty(), tokens.is_empty()) {
            (true, true) => Err(Diagnostic::duplicate_flag(&key)),
            (true, false) | (false, true) => Err(Diagnostic::mixed_flag_and_data(&key)),
            (false, false) => {
                let first = std::mem::take(first);
                *existing = Occurrence::Multiple(vec![first, tokens]);
                Ok(())
            }
        },
        Occurrence::Multiple(all) => {
            // Invariant: a Multiple only ever holds non-empty lists.
            if tokens.is_empty() {
                return Err(Diagnostic::mixed_flag_and_data(&key));
            }
            all.push(tokens);
            Ok(())
        }
    }
}

/// Sanitizes one aggregated entry: numeric coercion per token, and the flag
/// marker for a valueless single occurrence. An empty `Multiple` element
/// cannot reach this point; the aggregator already rejected it.
fn sanitize(occurrence: Occurrence<Vec<String>>) -> Field {
    match occurrence {
        Occurrence::Single(tokens) if tokens.is_empty() => Field::Flag,
        Occurrence::Single(tokens) => Field::Data(Occurrence::Single(sanitize_tokens(tokens))),
        Occurrence::Multiple(all) => Field::Data(Occurrence::Multiple(
            all.into_iter().map(sanitize_tokens).collect(),
        )),
    }
}

fn sanitize_tokens(tokens: Vec<String>) -> Vec<Value> {
    tokens.into_iter().map(Value::sanitize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_normalizes_and_collapses() {
        let document = "a 1\r\nb 2 ; trailing comment\n\n\n\nc 3\n";
        let blocks = split_blocks(document);
        assert_eq!(blocks, vec!["a 1\nb 2".to_string(), "c 3".to_string()]);
    }

    #[test]
    fn comment_only_line_separates_blocks() {
        // Stripping the comment leaves a blank line, and blank lines are
        // block boundaries wherever they come from.
        let blocks = split_blocks("a 1\n; divider\nb 2\n");
        assert_eq!(blocks, vec!["a 1".to_string(), "b 2".to_string()]);
    }

    #[test]
    fn split_empty_document_yields_no_blocks() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n\n").is_empty());
        assert!(split_blocks("; nothing but comments\n;\n").is_empty());
    }

    #[test]
    fn line_splits_key_from_comma_tokens() {
        let (key, tokens) = parse_line("stat_health      1, 0").unwrap();
        assert_eq!(key, "stat_health");
        assert_eq!(tokens, vec!["1".to_string(), "0".to_string()]);
    }

    #[test]
    fn line_with_no_values_is_a_bare_key() {
        let (key, tokens) = parse_line("is_female").unwrap();
        assert_eq!(key, "is_female");
        assert!(tokens.is_empty());
    }

    #[test]
    fn tokens_keep_internal_spaces() {
        let (_, tokens) = parse_line("voice_type       Light_1 roman").unwrap();
        assert_eq!(tokens, vec!["Light_1 roman".to_string()]);
    }

    #[test]
    fn blank_line_is_malformed() {
        assert_eq!(parse_line("   "), Err(Diagnostic::malformed_line("")));
    }

    #[test]
    fn aggregate_promotes_to_multiple_in_order() {
        let mut entries = IndexMap::new();
        aggregate(&mut entries, "ethnicity".into(), vec!["germans".into()]).unwrap();
        aggregate(&mut entries, "ethnicity".into(), vec!["dacians".into()]).unwrap();
        aggregate(&mut entries, "ethnicity".into(), vec!["scythians".into()]).unwrap();
        let Occurrence::Multiple(all) = &entries["ethnicity"] else {
            panic!("expected Multiple");
        };
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], vec!["germans".to_string()]);
        assert_eq!(all[2], vec!["scythians".to_string()]);
    }

    #[test]
    fn aggregate_rejects_repeated_flags() {
        let mut entries = IndexMap::new();
        aggregate(&mut entries, "is_female".into(), vec![]).unwrap();
        assert_eq!(
            aggregate(&mut entries, "is_female".into(), vec![]),
            Err(Diagnostic::duplicate_flag("is_female"))
        );
    }

    #[test]
    fn aggregate_rejects_flag_data_mix_both_orders() {
        let mut entries = IndexMap::new();
        aggregate(&mut entries, "k".into(), vec![]).unwrap();
        assert_eq!(
            aggregate(&mut entries, "k".into(), vec!["v".into()]),
            Err(Diagnostic::mixed_flag_and_data("k"))
        );

        let mut entries = IndexMap::new();
        aggregate(&mut entries, "k".into(), vec!["v".into()]).unwrap();
        assert_eq!(
            aggregate(&mut entries, "k".into(), vec![]),
            Err(Diagnostic::mixed_flag_and_data("k"))
        );

        // And once a Multiple exists.
        let mut entries = IndexMap::new();
        aggregate(&mut entries, "k".into(), vec!["a".into()]).unwrap();
        aggregate(&mut entries, "k".into(), vec!["b".into()]).unwrap();
        assert_eq!(
            aggregate(&mut entries, "k".into(), vec![]),
            Err(Diagnostic::mixed_flag_and_data("k"))
        );
    }

    #[test]
    fn aggregate_keeps_first_seen_order() {
        let mut entries = IndexMap::new();
        aggregate(&mut entries, "b".into(), vec!["1".into()]).unwrap();
        aggregate(&mut entries, "a".into(), vec!["2".into()]).unwrap();
        let keys: Vec<_> = entries.keys().cloned().collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn sanitize_marks_flags_and_coerces() {
        assert_eq!(sanitize(Occurrence::Single(vec![])), Field::Flag);
        let field = sanitize(Occurrence::Single(vec!["40".into(), "square".into()]));
        assert_eq!(
            field.values().unwrap(),
            &[Value::from(40), Value::from("square")]
        );
    }
}

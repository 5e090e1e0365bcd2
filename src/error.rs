//! Diagnostics for rejected descriptor blocks.
//!
//! Every failure in the parse pipeline is block-local: it aborts record
//! construction for the offending block, becomes one [`Diagnostic`], and the
//! remaining blocks of the document are processed regardless. Nothing here is
//! fatal to a whole parse, which is why [`crate::parse`] returns diagnostics as
//! plain values instead of an `Err`.
//!
//! ## Taxonomy
//!
//! - [`Diagnostic::MalformedLine`]: a line with no key token
//! - [`Diagnostic::DuplicateFlag`]: the same valueless key twice in one block
//! - [`Diagnostic::MixedFlagAndData`]: a repeated key that is sometimes a flag
//!   and sometimes carries values
//! - [`Diagnostic::MissingRequiredValue`]: a required key absent, or present
//!   with fewer values than its required positions
//! - [`Diagnostic::UnexpectedEmptyData`]: a data key present with no values
//! - [`Diagnostic::InvalidValueType`]: a value whose type does not match its
//!   declared position (or trailing values with no declared rest type)
//! - [`Diagnostic::ExpectedBooleanFlag`]: a flag-only key carrying values
//!
//! ## Examples
//!
//! ```rust
//! use descr_unit::{parse, Diagnostic};
//!
//! let output = parse("is_female\nis_female\n");
//! assert_eq!(
//!     output.diagnostics[0].diagnostic,
//!     Diagnostic::duplicate_flag("is_female")
//! );
//! ```

use serde::Serialize;
use thiserror::Error;

/// The reason one block was rejected, with the offending key or line.
#[derive(Clone, Debug, PartialEq, Error, Serialize)]
pub enum Diagnostic {
    /// A line with no key token reached the line parser.
    #[error("malformed line: {line:?}")]
    MalformedLine { line: String },

    /// A valueless (flag) key appeared more than once in one block.
    #[error("flag key `{key}` repeated within one block")]
    DuplicateFlag { key: String },

    /// A repeated key was a bare flag on one line and carried values on another.
    #[error("key `{key}` mixes flag and data occurrences")]
    MixedFlagAndData { key: String },

    /// A required key was absent, or an occurrence fell short of its required
    /// positions.
    #[error("key `{key}` is missing required values: expected {expected}, found {found}")]
    MissingRequiredValue {
        key: String,
        expected: usize,
        found: usize,
    },

    /// A data key was present with no values at all.
    #[error("key `{key}` carries no values but is not a flag")]
    UnexpectedEmptyData { key: String },

    /// A value failed the type declared for its position, or trailed past the
    /// declared positions of a key with no rest type.
    #[error("invalid value for `{key}` at position {position}: expected {expected}, found {found}")]
    InvalidValueType {
        key: String,
        position: usize,
        expected: String,
        found: String,
    },

    /// A flag-only key carried data values.
    #[error("key `{key}` is a boolean flag and cannot carry values")]
    ExpectedBooleanFlag { key: String },
}

impl Diagnostic {
    /// Creates a [`Diagnostic::MalformedLine`] for the given input line.
    pub fn malformed_line(line: &str) -> Self {
        Diagnostic::MalformedLine {
            line: line.to_string(),
        }
    }

    /// Creates a [`Diagnostic::DuplicateFlag`] for the given key.
    pub fn duplicate_flag(key: &str) -> Self {
        Diagnostic::DuplicateFlag {
            key: key.to_string(),
        }
    }

    /// Creates a [`Diagnostic::MixedFlagAndData`] for the given key.
    pub fn mixed_flag_and_data(key: &str) -> Self {
        Diagnostic::MixedFlagAndData {
            key: key.to_string(),
        }
    }

    /// Creates a [`Diagnostic::MissingRequiredValue`] with expected/found counts.
    pub fn missing_required_value(key: &str, expected: usize, found: usize) -> Self {
        Diagnostic::MissingRequiredValue {
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Creates a [`Diagnostic::UnexpectedEmptyData`] for the given key.
    pub fn unexpected_empty_data(key: &str) -> Self {
        Diagnostic::UnexpectedEmptyData {
            key: key.to_string(),
        }
    }

    /// Creates a [`Diagnostic::InvalidValueType`] for one value position.
    pub fn invalid_value_type(key: &str, position: usize, expected: &str, found: &str) -> Self {
        Diagnostic::InvalidValueType {
            key: key.to_string(),
            position,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a [`Diagnostic::ExpectedBooleanFlag`] for the given key.
    pub fn expected_boolean_flag(key: &str) -> Self {
        Diagnostic::ExpectedBooleanFlag {
            key: key.to_string(),
        }
    }

    /// The key this diagnostic is about, if it is key-scoped rather than
    /// line-scoped.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Diagnostic::MalformedLine { .. } => None,
            Diagnostic::DuplicateFlag { key }
            | Diagnostic::MixedFlagAndData { key }
            | Diagnostic::MissingRequiredValue { key, .. }
            | Diagnostic::UnexpectedEmptyData { key }
            | Diagnostic::InvalidValueType { key, .. }
            | Diagnostic::ExpectedBooleanFlag { key } => Some(key),
        }
    }
}

/// A [`Diagnostic`] tied to the index of the block it rejected.
///
/// Block indices count every block the splitter produced, accepted or not, so
/// they line up with the document as written.
#[derive(Clone, Debug, PartialEq, Error, Serialize)]
#[error("block {block}: {diagnostic}")]
pub struct BlockDiagnostic {
    /// Zero-based index of the rejected block within the document.
    pub block: usize,
    /// Why the block was rejected.
    pub diagnostic: Diagnostic,
}

/// Alias for results that fail with a block-local [`Diagnostic`].
pub type Result<T> = std::result::Result<T, Diagnostic>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        let diagnostic = Diagnostic::missing_required_value("stat_health", 2, 1);
        assert_eq!(
            diagnostic.to_string(),
            "key `stat_health` is missing required values: expected 2, found 1"
        );
        assert_eq!(diagnostic.key(), Some("stat_health"));
    }

    #[test]
    fn malformed_line_has_no_key() {
        assert_eq!(Diagnostic::malformed_line("   ").key(), None);
    }

    #[test]
    fn block_diagnostic_prefixes_index() {
        let wrapped = BlockDiagnostic {
            block: 3,
            diagnostic: Diagnostic::duplicate_flag("is_female"),
        };
        assert!(wrapped.to_string().starts_with("block 3:"));
    }
}

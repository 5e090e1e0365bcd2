//! Configuration options for descriptor serialization.
//!
//! The stock game files align every value list at one key column; that width
//! is the only knob the writer exposes.
//!
//! ## Examples
//!
//! ```rust
//! use descr_unit::{parse, serialize_with_options, FormatOptions};
//!
//! let output = parse("\
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
//! ");
//!
//! let wide = serialize_with_options(&output.records, FormatOptions::new().with_key_column(24));
//! assert!(wide.starts_with("type                    roman hastati\n"));
//! ```

/// Width of the key column in the stock descriptor files.
pub const DEFAULT_KEY_COLUMN: usize = 17;

/// Serialization options for [`crate::serialize_with_options`].
///
/// # Examples
///
/// ```rust
/// use descr_unit::FormatOptions;
///
/// let options = FormatOptions::new().with_key_column(20);
/// assert_eq!(options.key_column, 20);
/// assert_eq!(FormatOptions::default().key_column, 17);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Column the first value starts at; keys shorter than this are padded
    /// with spaces. A key at or past the column gets no padding at all, so
    /// pick a width wider than the longest key if alignment matters.
    pub key_column: usize,
}

impl FormatOptions {
    /// Creates options with the stock key column.
    #[must_use]
    pub fn new() -> Self {
        FormatOptions {
            key_column: DEFAULT_KEY_COLUMN,
        }
    }

    /// Sets the key column width.
    #[must_use]
    pub fn with_key_column(mut self, key_column: usize) -> Self {
        self.key_column = key_column;
        self
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new()
    }
}

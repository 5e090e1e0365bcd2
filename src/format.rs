//! The unit-descriptor format, as this crate reads and writes it.
//!
//! # Overview
//!
//! A descriptor document is a plain-text list of unit records. Each record is
//! one *block* of consecutive non-blank lines; blocks are separated by one or
//! more blank lines. Each line names a *key* and, optionally, a list of
//! comma-separated *values*:
//!
//! ```text
//! type             barb infantry brave
//! dictionary       barb_infantry_brave
//! category         infantry
//! class            light
//! voice_type       Medium_1 barbarian
//! soldier          barb_brave, 60, 0, 1.0
//! attributes       sea_faring, hide_forest, warcry
//! formation        1.2, 1.5, 2.4, 3, 5, square
//! stat_health      1, 0
//! stat_pri         7, 4, no, 0, 0, melee, simple, slashing, sword, 25, 1
//! stat_pri_attr    no
//! stat_sec         11, 3, no, 0, 0, melee, simple, blade, none, 25, 1
//! stat_sec_attr    no
//! is_female
//! ```
//!
//! # Lexical rules
//!
//! - Line terminators: `\r` is stripped on read; the writer always emits `\n`.
//! - Comments: everything from the first `;` to end of line is discarded.
//! - Whitespace: lines are trimmed; the key ends at the first whitespace run;
//!   each comma-separated value token is trimmed. Values themselves may
//!   contain spaces (`voice_type  Light_1 roman` is one value).
//! - Blank lines: any run of blank lines is one block separator. Leading and
//!   trailing blank lines are ignored, so an empty (or comments-only)
//!   document contains zero blocks.
//!
//! # Keys
//!
//! | Kind | Example | Meaning |
//! |------|---------|---------|
//! | Data key | `stat_health  1, 0` | carries positional values |
//! | Flag key | `is_female` | bare presence means `true`, absence `false` |
//! | Repeated key | two `stat_pri_attr` lines | alternative value tuples, order kept |
//!
//! A repeated key must carry values on every line: repeating a bare flag is
//! rejected (`DuplicateFlag`), and mixing a bare line with a data line for the
//! same key is rejected too (`MixedFlagAndData`).
//!
//! # Values
//!
//! Value tokens are strings unless they parse as a signed decimal or float
//! literal (optional exponent), in which case they become numbers: `40`,
//! `-2`, `1.2`, `2e3`. The empty token is never a number and never valid for
//! any declared position.
//!
//! # The checklist
//!
//! [`crate::checklist`] declares every recognized key's positional contract:
//! required positions, optional trailing positions, and an open-ended rest
//! type (see [`crate::SchemaEntry`]). Validation is block-scoped and
//! all-or-nothing: the first violation rejects the block with one
//! [`crate::Diagnostic`] and the next block starts fresh.
//!
//! Keys not in the checklist are silently dropped during validation. They are
//! the one thing the crate does not round-trip.
//!
//! # Writeout
//!
//! The writer iterates the checklist, not the parsed key order, producing the
//! canonical layout: keys padded to a 17-column value margin, values joined
//! with `", "`, flags as bare keys, one blank line between records.

// This module contains only documentation; no implementation code

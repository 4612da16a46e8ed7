//! Fatal generation errors
//!
//! Any of these aborts the whole run before the WAD is written.

use thiserror::Error;

/// Errors raised by the matching, layout and serialization stages
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Glyph asset contains a pixel column that never occurs in the atlas
    #[error("glyph '{glyph}': column {column} not found in atlas")]
    UnknownColumn { glyph: String, column: usize },

    /// Phrase uses a character (or spacer) with no glyph asset
    #[error("no glyph for '{0}'")]
    UnknownGlyph(String),

    /// Coordinate or record index does not fit the 16-bit map format
    #[error("{what} value {value} does not fit in a 16-bit map field")]
    FieldOverflow { what: &'static str, value: i64 },

    /// Word list holds more levels than the map naming scheme can address
    #[error("{count} levels requested, at most {max} fit in one WAD")]
    TooManyLevels { count: usize, max: usize },
}

//! Atlas column matching
//!
//! Handles:
//! - Decoding atlas and glyph images into pixel columns
//! - Indexing atlas columns by value
//! - Resolving glyph columns to atlas positions
//! - Compressing matched positions into texture ranges

pub mod column;
pub mod lookup;
pub mod matcher;
pub mod ranges;

pub use column::{columns_from_image, columns_from_path, Column, Rgb};
pub use lookup::LookUp;
pub use matcher::fit_to_atlas;
pub use ranges::{expand_ranges, make_ranges, Range};

//! Glyph assets and the compiled glyph-range table
//!
//! Each glyph is a small image cut from the same artwork as the atlas.
//! Compiling a glyph matches its columns against the atlas and keeps only
//! the resulting texture ranges.

use crate::atlas::{columns_from_path, fit_to_atlas, make_ranges, Column, LookUp, Range};
use crate::error::GenerateError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// File stem of the glyph drawn for a space between words
pub const LONG_SPACE: &str = "long_space";
/// File stem of the glyph drawn between two letters
pub const SHORT_SPACE: &str = "short_space";

/// Key of the glyph-range table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlyphName {
    Char(char),
    LongSpace,
    ShortSpace,
}

impl fmt::Display for GlyphName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlyphName::Char(c) => write!(f, "{}", c),
            GlyphName::LongSpace => f.write_str(LONG_SPACE),
            GlyphName::ShortSpace => f.write_str(SHORT_SPACE),
        }
    }
}

impl FromStr for GlyphName {
    type Err = String;

    /// Parse an asset file stem: a single character or a spacer name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LONG_SPACE => return Ok(GlyphName::LongSpace),
            SHORT_SPACE => return Ok(GlyphName::ShortSpace),
            _ => {}
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(GlyphName::Char(c)),
            _ => Err(format!("not a glyph name: {:?}", s)),
        }
    }
}

/// Glyph name -> atlas ranges
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<GlyphName, Vec<Range>>,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match one glyph against the atlas and store its ranges
    pub fn compile(
        &mut self,
        name: GlyphName,
        columns: &[Column],
        lut: &LookUp,
    ) -> Result<&[Range], GenerateError> {
        let indexes = fit_to_atlas(&name.to_string(), columns, lut)?;
        let ranges = make_ranges(&indexes);
        debug!("'{}': {} columns -> {} ranges", name, indexes.len(), ranges.len());
        self.insert(name, ranges);
        Ok(self.get(name).unwrap_or_default())
    }

    pub fn insert(&mut self, name: GlyphName, ranges: Vec<Range>) {
        self.glyphs.insert(name, ranges);
    }

    pub fn get(&self, name: GlyphName) -> Option<&[Range]> {
        self.glyphs.get(&name).map(Vec::as_slice)
    }

    /// Ranges for `name`, or `UnknownGlyph`
    pub fn require(&self, name: GlyphName) -> Result<&[Range], GenerateError> {
        self.get(name)
            .ok_or_else(|| GenerateError::UnknownGlyph(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Entries sorted by name (spacers after characters)
    pub fn sorted(&self) -> Vec<(GlyphName, &[Range])> {
        let mut entries: Vec<_> = self
            .glyphs
            .iter()
            .map(|(n, r)| (*n, r.as_slice()))
            .collect();
        entries.sort_by_key(|(n, _)| *n);
        entries
    }

    /// Compile every `*.png` / `*.gif` glyph in `dir`
    ///
    /// Files whose stem is not a glyph name are skipped with a warning.
    /// A glyph whose columns do not occur in the atlas aborts the load.
    pub fn load_dir(dir: &Path, lut: &LookUp) -> Result<Self> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read glyph directory: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("png") || e.eq_ignore_ascii_case("gif"))
            })
            .collect();
        // read_dir order is platform dependent
        paths.sort();

        let mut table = Self::new();
        for path in &paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!("Skipping glyph with non UTF-8 name: {}", path.display());
                continue;
            };
            let name = match stem.parse::<GlyphName>() {
                Ok(name) => name,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if table.get(name).is_some() {
                warn!("Duplicate glyph '{}': {} replaces earlier file", name, path.display());
            }

            let columns = columns_from_path(path)?;
            table
                .compile(name, &columns, lut)
                .with_context(|| format!("Failed to compile glyph: {}", path.display()))?;
        }

        info!("Loaded {} glyphs from {}", table.len(), dir.display());
        Ok(table)
    }
}

impl fmt::Display for GlyphTable {
    /// One `name: [(start, len), ..]` line per glyph
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, ranges) in self.sorted() {
            let parts: Vec<String> = ranges
                .iter()
                .map(|r| format!("({}, {})", r.start, r.len))
                .collect();
            writeln!(f, "{:?}: [{}]", name.to_string(), parts.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_glyph_name() {
        assert_eq!("a".parse::<GlyphName>(), Ok(GlyphName::Char('a')));
        assert_eq!("7".parse::<GlyphName>(), Ok(GlyphName::Char('7')));
        assert_eq!("long_space".parse::<GlyphName>(), Ok(GlyphName::LongSpace));
        assert_eq!("short_space".parse::<GlyphName>(), Ok(GlyphName::ShortSpace));
        assert!("ab".parse::<GlyphName>().is_err());
        assert!("".parse::<GlyphName>().is_err());
    }

    #[test]
    fn test_compile_and_require() {
        let atlas: Vec<Column> = (0u8..10).map(|v| vec![[v, v, v]; 4]).collect();
        let lut = LookUp::build(&atlas);

        let mut table = GlyphTable::new();
        let ranges = table
            .compile(GlyphName::Char('a'), &atlas[2..5], &lut)
            .unwrap()
            .to_vec();
        assert_eq!(ranges, vec![Range::new(2, 3)]);
        assert_eq!(table.require(GlyphName::Char('a')).unwrap(), &ranges[..]);
        assert_eq!(
            table.require(GlyphName::Char('z')),
            Err(GenerateError::UnknownGlyph("z".to_string()))
        );
    }

    #[test]
    fn test_display_sorted() {
        let mut table = GlyphTable::new();
        table.insert(GlyphName::ShortSpace, vec![Range::new(9, 1)]);
        table.insert(GlyphName::Char('b'), vec![Range::new(5, 1)]);
        table.insert(GlyphName::Char('a'), vec![Range::new(0, 2), Range::new(4, 1)]);
        assert_eq!(
            table.to_string(),
            "\"a\": [(0, 2), (4, 1)]\n\"b\": [(5, 1)]\n\"short_space\": [(9, 1)]\n"
        );
    }
}

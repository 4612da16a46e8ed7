//! Phrase layout
//!
//! Turns a line of text into the ordered list of atlas strips that spell it.
//! Word gaps use the `long_space` glyph, letter gaps the `short_space` glyph.

use crate::atlas::Range;
use crate::error::GenerateError;
use crate::glyph::{GlyphName, GlyphTable};

/// One renderable strip of the atlas texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseSegment {
    /// First atlas column shown (sidedef x offset)
    pub offset: usize,
    /// Width of the strip in map units
    pub width: usize,
}

impl From<Range> for PhraseSegment {
    fn from(r: Range) -> Self {
        Self {
            offset: r.start,
            width: r.len,
        }
    }
}

/// Segments of one text line, left to right
pub type Line = Vec<PhraseSegment>;

/// Lay out `text` (case-folded) using the glyph table
///
/// A space emits the long spacer. Any other character emits its own
/// glyph, followed by the short spacer when the next character is neither
/// a space nor the end of the text.
pub fn layout_phrase(text: &str, glyphs: &GlyphTable) -> Result<Line, GenerateError> {
    let text = text.to_lowercase();
    let mut line = Line::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ' ' {
            push(&mut line, glyphs.require(GlyphName::LongSpace)?);
            continue;
        }

        push(&mut line, glyphs.require(GlyphName::Char(ch))?);
        if chars.peek().is_some_and(|&next| next != ' ') {
            push(&mut line, glyphs.require(GlyphName::ShortSpace)?);
        }
    }

    Ok(line)
}

fn push(line: &mut Line, ranges: &[Range]) {
    line.extend(ranges.iter().copied().map(PhraseSegment::from));
}

/// Total width of a laid out line
pub fn line_width(line: &[PhraseSegment]) -> usize {
    line.iter().map(|s| s.width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(offset: usize, width: usize) -> PhraseSegment {
        PhraseSegment { offset, width }
    }

    fn table() -> GlyphTable {
        let mut t = GlyphTable::new();
        t.insert(GlyphName::Char('a'), vec![Range::new(0, 2)]);
        t.insert(GlyphName::Char('b'), vec![Range::new(5, 1)]);
        t.insert(GlyphName::ShortSpace, vec![Range::new(9, 1)]);
        t.insert(GlyphName::LongSpace, vec![Range::new(20, 3)]);
        t
    }

    #[test]
    fn test_letter_spacing() {
        assert_eq!(
            layout_phrase("ab", &table()).unwrap(),
            vec![seg(0, 2), seg(9, 1), seg(5, 1)]
        );
    }

    #[test]
    fn test_word_spacing() {
        assert_eq!(
            layout_phrase("a b", &table()).unwrap(),
            vec![seg(0, 2), seg(20, 3), seg(5, 1)]
        );
    }

    #[test]
    fn test_case_folded() {
        assert_eq!(
            layout_phrase("AB", &table()).unwrap(),
            layout_phrase("ab", &table()).unwrap()
        );
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(layout_phrase("a", &table()).unwrap(), vec![seg(0, 2)]);
        assert!(layout_phrase("", &table()).unwrap().is_empty());
    }

    #[test]
    fn test_double_space() {
        assert_eq!(
            layout_phrase("a  b", &table()).unwrap(),
            vec![seg(0, 2), seg(20, 3), seg(20, 3), seg(5, 1)]
        );
    }

    #[test]
    fn test_multi_range_glyph() {
        let mut t = table();
        t.insert(GlyphName::Char('c'), vec![Range::new(3, 1), Range::new(7, 2)]);
        let line = layout_phrase("ca", &t).unwrap();
        assert_eq!(line, vec![seg(3, 1), seg(7, 2), seg(9, 1), seg(0, 2)]);
        assert_eq!(line_width(&line), 6);
    }

    #[test]
    fn test_unknown_glyph() {
        assert_eq!(
            layout_phrase("abz", &table()),
            Err(GenerateError::UnknownGlyph("z".to_string()))
        );
    }

    #[test]
    fn test_missing_spacer() {
        let mut t = GlyphTable::new();
        t.insert(GlyphName::Char('a'), vec![Range::new(0, 2)]);
        assert!(layout_phrase("a", &t).is_ok());
        assert_eq!(
            layout_phrase("aa", &t),
            Err(GenerateError::UnknownGlyph("short_space".to_string()))
        );
    }
}

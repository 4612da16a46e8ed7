//! Run-length compression of matched atlas positions

/// Run of consecutive atlas columns: `start, start+1, .., start+len-1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// First atlas column of the run
    pub start: usize,
    /// Number of columns (always > 0)
    pub len: usize,
}

impl Range {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last atlas column
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Split a position list into maximal ascending runs
pub fn make_ranges(indexes: &[usize]) -> Vec<Range> {
    let mut result: Vec<Range> = Vec::new();
    for &idx in indexes {
        match result.last_mut() {
            Some(run) if run.end() == idx => run.len += 1,
            _ => result.push(Range::new(idx, 1)),
        }
    }
    result
}

/// Inverse of [`make_ranges`]
pub fn expand_ranges(ranges: &[Range]) -> Vec<usize> {
    ranges.iter().flat_map(|r| r.start..r.end()).collect()
}

//! Atlas column index
//!
//! Many atlas columns are visually identical (solid background, vertical
//! strokes), so a column value maps to every atlas position holding it.

use super::column::Column;
use std::collections::HashMap;

/// Column value -> ascending list of atlas positions with that value
#[derive(Debug, Clone, Default)]
pub struct LookUp {
    positions: HashMap<Column, Vec<usize>>,
    width: usize,
}

impl LookUp {
    /// Index every column of the atlas
    pub fn build(atlas: &[Column]) -> Self {
        let mut positions: HashMap<Column, Vec<usize>> = HashMap::new();
        for (x, column) in atlas.iter().enumerate() {
            positions.entry(column.clone()).or_default().push(x);
        }
        Self {
            positions,
            width: atlas.len(),
        }
    }

    /// Atlas positions whose column equals `column`, lowest first
    pub fn candidates(&self, column: &Column) -> Option<&[usize]> {
        self.positions.get(column).map(Vec::as_slice)
    }

    /// Width of the indexed atlas
    pub fn atlas_width(&self) -> usize {
        self.width
    }

    /// Number of distinct column values
    pub fn distinct_columns(&self) -> usize {
        self.positions.len()
    }

    /// Iterate over (column value, positions)
    pub fn iter(&self) -> impl Iterator<Item = (&Column, &[usize])> {
        self.positions.iter().map(|(c, p)| (c, p.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(v: u8) -> Column {
        vec![[v, v, v]; 2]
    }

    #[test]
    fn test_every_position_indexed_once() {
        let atlas = vec![col(0), col(1), col(0), col(2), col(1), col(0)];
        let lut = LookUp::build(&atlas);

        let total: usize = lut.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(total, atlas.len());
        assert_eq!(lut.atlas_width(), 6);
        assert_eq!(lut.distinct_columns(), 3);

        let mut seen: Vec<usize> = lut.iter().flat_map(|(_, p)| p.iter().copied()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
    }

    #[test]
    fn test_candidates_ascending() {
        let atlas = vec![col(7), col(3), col(7), col(7)];
        let lut = LookUp::build(&atlas);
        assert_eq!(lut.candidates(&col(7)), Some(&[0, 2, 3][..]));
        assert_eq!(lut.candidates(&col(3)), Some(&[1][..]));
        for (_, p) in lut.iter() {
            assert!(p.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_unknown_column() {
        let lut = LookUp::build(&[col(1)]);
        assert_eq!(lut.candidates(&col(2)), None);
    }
}

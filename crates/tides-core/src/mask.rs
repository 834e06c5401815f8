//! Per-query flood state.
use crate::coords::GridLocation;
use crate::error::{Result, TidesError};

/// Boolean grid, row-major, `true` where a cell is under water.
/// Produced fresh by every flood pass and owned by whoever asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodedMask {
    data: Vec<bool>,
    rows: usize,
    cols: usize,
}

impl FloodedMask {
    /// A fully dry mask.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { data: vec![false; rows * cols], rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(col < self.cols, "column {col} out of bounds for width {}", self.cols);
        self.data[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, flooded: bool) {
        assert!(col < self.cols, "column {col} out of bounds for width {}", self.cols);
        self.data[row * self.cols + col] = flooded;
    }

    /// Checked lookup; `OutOfRange` when `loc` is outside the mask.
    pub fn is_flooded(&self, loc: GridLocation) -> Result<bool> {
        if loc.row < self.rows && loc.col < self.cols {
            Ok(self.get(loc.row, loc.col))
        } else {
            Err(TidesError::OutOfRange {
                row: loc.row,
                col: loc.col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn flooded_count(&self) -> usize {
        self.data.iter().filter(|&&f| f).count()
    }

    pub fn dry_count(&self) -> usize {
        self.data.len() - self.flooded_count()
    }

    /// Flooded cells in row-major order.
    pub fn flooded_cells(&self) -> impl Iterator<Item = GridLocation> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &f)| f)
            .map(move |(i, _)| GridLocation::new(i / cols, i % cols))
    }

    /// True if every cell flooded in `other` is also flooded here.
    /// Masks of different shape are never supersets of each other.
    pub fn is_superset_of(&self, other: &FloodedMask) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.iter().zip(&other.data).all(|(&a, &b)| a || !b)
    }
}

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coords::GridLocation;
use crate::error::{Result, TidesError};

/// An immutable elevation grid with the cells where water enters it.
/// Elevations are stored row-major. Never mutated after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TerrainFile", into = "TerrainFile")]
pub struct Terrain {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    sources: Vec<GridLocation>,
}

/// Unvalidated on-disk layout: nested rows plus a list of `{row, col}`
/// sources. Convert with `Terrain::try_from` to validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainFile {
    pub heights: Vec<Vec<f64>>,
    pub sources: Vec<GridLocation>,
}

impl Terrain {
    /// Validate and build a terrain from nested rows.
    ///
    /// Fails with `InvalidTerrain` if the grid is empty, rows differ in
    /// length, an elevation is NaN, there are no sources, or a source lies
    /// outside the grid.
    pub fn new(heights: Vec<Vec<f64>>, sources: Vec<GridLocation>) -> Result<Self> {
        let rows = heights.len();
        let cols = heights.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(TidesError::invalid("terrain grid is empty"));
        }
        if let Some((r, row)) = heights.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(TidesError::invalid(format!(
                "row {r} has {} columns, expected {cols}",
                row.len()
            )));
        }

        let data: Vec<f64> = heights.into_iter().flatten().collect();
        if let Some(i) = data.iter().position(|z| z.is_nan()) {
            return Err(TidesError::invalid(format!(
                "elevation at ({}, {}) is NaN",
                i / cols,
                i % cols
            )));
        }

        if sources.is_empty() {
            return Err(TidesError::invalid("terrain has no water sources"));
        }
        if let Some(s) = sources.iter().find(|s| s.row >= rows || s.col >= cols) {
            return Err(TidesError::invalid(format!(
                "source {s} is outside the {rows}x{cols} grid"
            )));
        }

        debug!(rows, cols, sources = sources.len(), "terrain validated");
        Ok(Self { data, rows, cols, sources })
    }

    /// Parse a terrain from its JSON layout and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: TerrainFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let file: TerrainFile = serde_json::from_reader(reader)?;
        Self::try_from(file)
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
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    pub fn sources(&self) -> &[GridLocation] {
        &self.sources
    }

    /// Row-major elevation values.
    pub fn elevations(&self) -> &[f64] {
        &self.data
    }

    /// Unchecked lookup; panics outside the grid like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.cols, "column {col} out of bounds for width {}", self.cols);
        self.data[row * self.cols + col]
    }

    /// Elevation at `loc`, or `OutOfRange` when the cell is outside the grid.
    pub fn elevation(&self, loc: GridLocation) -> Result<f64> {
        self.index_of(loc).map(|i| self.data[i])
    }

    #[inline]
    pub fn contains(&self, loc: GridLocation) -> bool {
        loc.row < self.rows && loc.col < self.cols
    }

    /// Row-major index of `loc`.
    pub fn index_of(&self, loc: GridLocation) -> Result<usize> {
        if self.contains(loc) {
            Ok(loc.row * self.cols + loc.col)
        } else {
            Err(self.out_of_range(loc))
        }
    }

    #[inline]
    pub fn location_of(&self, index: usize) -> GridLocation {
        GridLocation::new(index / self.cols, index % self.cols)
    }

    pub(crate) fn out_of_range(&self, loc: GridLocation) -> TidesError {
        TidesError::OutOfRange {
            row: loc.row,
            col: loc.col,
            rows: self.rows,
            cols: self.cols,
        }
    }
}

impl TryFrom<TerrainFile> for Terrain {
    type Error = TidesError;

    fn try_from(file: TerrainFile) -> Result<Self> {
        Terrain::new(file.heights, file.sources)
    }
}

impl From<Terrain> for TerrainFile {
    fn from(t: Terrain) -> Self {
        Self {
            heights: t.data.chunks(t.cols).map(<[f64]>::to_vec).collect(),
            sources: t.sources,
        }
    }
}

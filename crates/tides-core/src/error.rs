use thiserror::Error;

pub type Result<T> = std::result::Result<T, TidesError>;

#[derive(Error, Debug)]
pub enum TidesError {
    /// Terrain failed validation at construction time.
    #[error("invalid terrain: {reason}")]
    InvalidTerrain { reason: String },

    /// A point query named a cell outside the grid.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("malformed terrain JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TidesError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTerrain { reason: reason.into() }
    }
}

use thiserror::Error;

/// Failures surfaced by board access, pathfinding and maze generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("{0} is not a valid cell value")]
    InvalidCellValue(u8),

    #[error("no path exists between the requested endpoints")]
    PathNotFound,

    #[error("board dimensions {rows}x{cols} are too small for this operation")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("visualization cadence must be at least 1")]
    InvalidMultiplier,

    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
}

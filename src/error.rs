//! Error types for the grid engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GridError>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate access (read, write, or seed) outside the grid bounds.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: i32,
        col: i32,
        rows: i32,
        cols: i32,
    },
}

//! Core library for Conway's Game of Life on a bounded grid.

pub mod enc;
pub mod engine;
pub mod error;
pub mod pos;

pub use enc::{PatternCodec, RunLengthEncoded};
pub use engine::{GameOfLife, Grid, GridView};
pub use error::{GridError, Result};
pub use pos::Pos2;

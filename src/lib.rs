//! Conway's Game of Life on a finite board whose edges wrap around.

pub mod cell;
pub mod engine;
pub mod error;
pub mod patterns;

pub use cell::Cell;
pub use engine::{Board, BoardOptions, PlayState};
pub use error::{BoardError, PatternError, Result};

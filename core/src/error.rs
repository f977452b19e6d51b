use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must be at least 1x1, got {height} rows by {width} columns")]
    EmptyBoard { height: Coord, width: Coord },
    #[error("Too many mines, {mines} requested for a board of {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Invalid coordinates {0:?}")]
    OutOfBounds(Coord2),
}

impl GameError {
    /// Whether this error prevents a session from being constructed at all.
    pub const fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::EmptyBoard { .. } | Self::TooManyMines { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Unknown preset, expected one of: beginner, intermediate, expert")]
pub struct ParsePresetError;

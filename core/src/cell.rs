use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, only this part evolves during a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Opened,
    /// The mine that ended the session.
    Exploded,
}

impl CellState {
    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened | Self::Exploded)
    }
}

/// Read-only view of one grid position.
///
/// `mined` and `mines_around` are fixed when the minefield is built.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    mined: bool,
    mines_around: u8,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new(mined: bool, mines_around: u8) -> Self {
        Self {
            mined,
            mines_around,
            state: CellState::Hidden,
        }
    }

    pub const fn is_mined(&self) -> bool {
        self.mined
    }

    pub const fn is_opened(&self) -> bool {
        self.state.is_opened()
    }

    pub const fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CellState::Hidden)
    }

    /// Number of mined cells among the (up to 8) neighbors.
    pub const fn mines_around(&self) -> u8 {
        self.mines_around
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

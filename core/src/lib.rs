#![no_std]

extern crate alloc;

use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use minefield::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod minefield;
mod types;

/// Board dimensions and mine count of one session.
///
/// Always satisfies `0 <= mines < width * height` when built through [`GameConfig::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameConfig {
    /// `(width, height)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::EmptyBoard { height, width });
        }
        let cells = mult(width, height);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        Ok(Self::new_unchecked((width, height), mines))
    }

    /// Re-checks a config that may have been built with [`GameConfig::new_unchecked`].
    pub fn validate(self) -> Result<Self> {
        Self::new(self.height(), self.width(), self.mines)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((10, 10), 20)
    }
}

/// Classic board sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked((9, 9), 10),
            Self::Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((30, 16), 99),
        }
    }
}

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("beginner") => Ok(Self::Beginner),
            s if s.eq_ignore_ascii_case("intermediate") => Ok(Self::Intermediate),
            s if s.eq_ignore_ascii_case("expert") => Ok(Self::Expert),
            _ => Err(ParsePresetError),
        }
    }
}

/// Where the mines are, fixed for the lifetime of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines exactly at `mine_coords`, duplicates are merged.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let (width, height) = size;
        GameConfig::new(height, width, 0)?;

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= width || coords.1 >= height {
                return Err(GameError::OutOfBounds(coords));
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        GameConfig::new(height, width, layout.mine_count)?;
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        Coords::new(self.size()).filter(|&coords| self[coords])
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }

    /// Whether the open ended the session.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Exploded | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn config_rejects_full_board() {
        assert_eq!(
            GameConfig::new(3, 3, 9),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        );
        assert!(GameConfig::new(3, 3, 10).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn config_rejects_empty_dimensions() {
        assert_eq!(
            GameConfig::new(0, 5, 0),
            Err(GameError::EmptyBoard { height: 0, width: 5 })
        );
        assert!(GameConfig::new(5, 0, 0).unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn config_accepts_bounds() {
        let config = GameConfig::new(1, 1, 0).unwrap();
        assert_eq!(config.total_cells(), 1);
        assert_eq!(config.safe_cells(), 1);

        let config = GameConfig::new(2, 5, 9).unwrap();
        assert_eq!((config.width(), config.height()), (5, 2));
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn validate_catches_unchecked_configs() {
        assert_eq!(
            GameConfig::new_unchecked((3, 3), 9).validate(),
            Err(GameError::TooManyMines { mines: 9, cells: 9 })
        );
        assert_eq!(
            GameConfig::new_unchecked((0, 3), 0).validate(),
            Err(GameError::EmptyBoard { height: 3, width: 0 })
        );
        assert_eq!(GameConfig::default().validate(), Ok(GameConfig::default()));
    }

    #[test]
    fn safe_cells_never_underflow() {
        assert_eq!(GameConfig::new_unchecked((2, 2), 7).safe_cells(), 0);
    }

    #[test]
    fn presets_are_valid() {
        for preset in [Preset::Beginner, Preset::Intermediate, Preset::Expert] {
            let config = preset.config();
            assert_eq!(
                GameConfig::new(config.height(), config.width(), config.mines),
                Ok(config)
            );
        }
        assert_eq!("Expert".parse::<Preset>().unwrap().config().size, (30, 16));
        assert_eq!("nightmare".parse::<Preset>(), Err(ParsePresetError));
    }

    #[test]
    fn layout_from_coords_merges_duplicates() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0), (2, 1), (0, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.size(), (3, 2));
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 1)));
        assert_eq!(layout.mines().collect::<Vec<_>>(), [(0, 0), (2, 1)]);
    }

    #[test]
    fn layout_from_coords_rejects_bad_input() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 2), &[(3, 0)]),
            Err(GameError::OutOfBounds((3, 0)))
        );
        assert_eq!(
            MineLayout::from_mine_coords((1, 1), &[(0, 0)]),
            Err(GameError::TooManyMines { mines: 1, cells: 1 })
        );
        assert!(MineLayout::from_mine_coords((0, 4), &[]).is_err());
    }

    #[test]
    fn adjacent_mine_count_matches_layout() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 0)]).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 0)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 0);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 1);
    }
}

use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions, both reached only through [`Minefield::open`]:
/// - InProgress -> Exploded
/// - InProgress -> Won
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    InProgress,
    Exploded,
    Won,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Exploded | Self::Won)
    }
}

/// Grid of cells for one session, owns all mutable game state.
///
/// Not internally synchronized, callers sharing one across threads must serialize access.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Minefield {
    cells: Array2<Cell>,
    mine_count: CellCount,
    opened_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Minefield {
    /// Builds the grid and precomputes every neighbor count, nothing is recomputed afterwards.
    pub fn new(layout: MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            Cell::new(layout[coords], layout.adjacent_mine_count(coords))
        });
        Self {
            cells,
            mine_count: layout.mine_count(),
            opened_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        }
    }

    /// Fails when `config` has an empty dimension or leaves no safe cell.
    pub fn generate(config: GameConfig, generator: impl LayoutGenerator) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self::new(generator.generate(config)?))
    }

    /// Validates the configuration and places `mines` uniformly at random.
    pub fn random(height: Coord, width: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new(height, width, mines)?;
        Self::generate(config, RandomLayoutGenerator::new(seed))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    /// `(width, height)`
    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.game_config().safe_cells()
    }

    /// Number of opened cells that are not mines.
    pub fn opened_count(&self) -> CellCount {
        self.opened_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn exploded(&self) -> bool {
        self.triggered_mine.is_some()
    }

    pub fn is_win(&self) -> bool {
        !self.exploded() && self.opened_count == self.safe_cell_count()
    }

    pub fn state(&self) -> SessionState {
        if self.exploded() {
            SessionState::Exploded
        } else if self.is_win() {
            SessionState::Won
        } else {
            SessionState::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn coords(&self) -> Coords {
        Coords::new(self.size())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.coords().map(|coords| (coords, self.cells[coords.to_nd_index()]))
    }

    /// Toggles the flag on a closed cell, opened cells and finished sessions are left alone.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use CellState::*;

        let coords = self.validate_coords(coords)?;
        if self.is_finished() {
            log::debug!("Ignoring flag at {:?}, session already finished", coords);
            return Ok(FlagOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        Ok(match cell.state() {
            Hidden => {
                cell.set_state(Flagged);
                self.flagged_count += 1;
                FlagOutcome::Changed
            }
            Flagged => {
                cell.set_state(Hidden);
                self.flagged_count -= 1;
                FlagOutcome::Changed
            }
            Opened | Exploded => FlagOutcome::NoChange,
        })
    }

    /// Opens a closed cell, cascading through zero-count cells.
    ///
    /// Flagged or already opened cells, and any cell once the session is over, are no-ops.
    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;
        if self.is_finished() {
            log::debug!("Ignoring open at {:?}, session already finished", coords);
            return Ok(OpenOutcome::NoChange);
        }

        let cell = self.cells[coords.to_nd_index()];
        if !cell.is_hidden() {
            return Ok(OpenOutcome::NoChange);
        }

        if cell.is_mined() {
            self.cells[coords.to_nd_index()].set_state(CellState::Exploded);
            self.triggered_mine = Some(coords);
            log::debug!("Mine exploded at {:?}", coords);
            return Ok(OpenOutcome::Exploded);
        }

        let opened = self.open_region(coords);
        log::debug!(
            "Opened {} cells from {:?}, {} of {} safe cells open",
            opened,
            coords,
            self.opened_count,
            self.safe_cell_count()
        );

        if self.is_win() {
            log::debug!("All safe cells opened, session won");
            Ok(OpenOutcome::Won)
        } else {
            Ok(OpenOutcome::Opened)
        }
    }

    /// Flood fill with an explicit worklist, the `Opened` state doubles as the visited mark so
    /// every cell enters the queue at most once.
    fn open_region(&mut self, start: Coord2) -> CellCount {
        let size = self.size();
        let mut opened = 0;
        let mut pending = VecDeque::new();

        self.mark_opened(start);
        opened += 1;
        pending.push_back(start);

        while let Some(coords) = pending.pop_front() {
            if self.cells[coords.to_nd_index()].mines_around() != 0 {
                continue;
            }

            for pos in Neighbors::new(coords, size) {
                let cell = self.cells[pos.to_nd_index()];
                if cell.is_hidden() && !cell.is_mined() {
                    self.mark_opened(pos);
                    opened += 1;
                    log::trace!(
                        "Flood opened cell at {:?}, mines around: {}",
                        pos,
                        cell.mines_around()
                    );
                    pending.push_back(pos);
                }
            }
        }

        opened
    }

    fn mark_opened(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].set_state(CellState::Opened);
        self.opened_count += 1;
    }
}

impl<'a> IntoIterator for &'a Minefield {
    type Item = Coord2;
    type IntoIter = Coords;

    fn into_iter(self) -> Self::IntoIter {
        self.coords()
    }
}

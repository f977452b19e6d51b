use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniform placement without replacement, reproducible from the seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        let config = config.validate()?;
        let total_cells = config.total_cells();
        let mines = config.mines;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut cells: Vec<CellCount> = (0..total_cells).collect();
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        // partial Fisher-Yates, the first `mines` slots end up a uniform sample
        for i in 0..usize::from(mines) {
            let j = rng.random_range(i..cells.len());
            cells.swap(i, j);
            let coords = from_linear(cells[i], config.width());
            mine_mask[coords.to_nd_index()] = true;
        }

        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            config.width(),
            config.height(),
            mines,
            self.seed
        );
        Ok(MineLayout::from_mine_mask(mine_mask))
    }
}

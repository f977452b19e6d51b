use crate::*;
pub use random::*;

mod random;

/// Strategy for placing mines on a board described by a [`GameConfig`].
///
/// Fails with an invalid-configuration error when the config does not leave at least one safe
/// cell on a non-empty board.
pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

impl LayoutGenerator for MineLayout {
    /// A fixed layout, already validated when it was built, the config is ignored.
    fn generate(self, _config: GameConfig) -> Result<MineLayout> {
        Ok(self)
    }
}

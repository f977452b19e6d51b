//! Terminal front end for [`mines_core`]: a text board, a game clock and an append-only list of
//! winners.

pub mod clock;
pub mod records;
pub mod render;
pub mod session;
pub mod settings;

pub use session::Session;
pub use settings::{Args, Settings};

// Use cases layer: application workflows for a game session.

pub mod game;
pub mod input;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use game::{GameLoop, LoopSettings, run_session};
pub use input::{FireFlag, ListenerExit, run_input_listener};
pub use types::{GamePhase, GameStats, GameStatus, GameSummary, RenderTarget};

//! The contract every agent offers the controller.
//!
//! An agent observes the game the controller lends it and may push commands
//! onto the shared queue. It never owns canonical game state and never reads
//! from the queue.

mod info;
mod state;

use std::collections::BTreeMap;

pub use info::{EngineInfo, Score};
pub use state::{AgentState, SharedState};

use crate::chess::{ChessGame, Move};
use crate::error::Result;

/// Legal moves offered to the user, keyed by the controller's own index.
pub type MoveMap = BTreeMap<usize, Move>;

/// A participant driven synchronously by the controller.
pub trait Agent {
    /// Actor tag used on queued messages.
    fn name(&self) -> &str;

    /// Whether initialization succeeded.
    fn agent_ready(&self) -> bool;

    /// Redraw the board, if this agent has one to draw.
    fn display_board(&mut self, _game: &mut dyn ChessGame) -> Result<()> {
        Ok(())
    }

    /// Show engine output.
    fn display_info(&mut self, game: &mut dyn ChessGame, info: &EngineInfo) -> Result<()>;

    /// Offer the legal moves for the side to move. `None` withdraws them.
    fn set_valid_moves(&mut self, game: &dyn ChessGame, moves: Option<&MoveMap>) -> Result<()>;
}

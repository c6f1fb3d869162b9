//! Chess vocabulary and the rules-collaborator interface.
//!
//! Agents never own a game. The controller lends one through the
//! [`ChessGame`] trait, and [`ShakmatyGame`] is the stock implementation.

mod game;
mod shakmaty_game;
mod types;

pub use game::{ChessGame, GameError};
pub use shakmaty_game::ShakmatyGame;
pub use types::{Color, Move, Piece, PieceKind, Square};

//! The capability interface agents need from the rules collaborator.

use thiserror::Error;

use super::{Color, Move, Piece, Square};

/// Errors reported by a rules implementation.
#[derive(Debug, Error)]
pub enum GameError {
    /// Square name could not be parsed.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move string could not be parsed.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// Move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// FEN could not be parsed into a position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),
}

/// A mutable chess position with a move stack.
///
/// Agents only ever borrow a game for the duration of a single call. Any
/// `push`/`pop` they perform is undone before the call returns.
pub trait ChessGame {
    /// Full position export.
    fn fen(&self) -> String;

    /// Side to move.
    fn turn(&self) -> Color;

    /// Fullmove counter as it appears in the FEN.
    fn fullmove_number(&self) -> u32;

    /// Side to move is in check.
    fn is_check(&self) -> bool;

    /// Side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// Piece on a square.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Number of pieces on the board.
    fn piece_count(&self) -> usize;

    /// Moves played so far, oldest first.
    fn move_stack(&self) -> &[Move];

    /// Play a move. The move must be legal.
    fn push(&mut self, mv: Move) -> Result<(), GameError>;

    /// Take back the last move.
    fn pop(&mut self) -> Option<Move>;
}

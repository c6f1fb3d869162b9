//! Scoped move-stack mutation.
//!
//! Both guards undo their work on drop, so a borrowed game is restored on
//! every exit path: normal return, `?`, or unwinding. A game that cannot be
//! put back is a broken invariant and panics.

use crate::chess::{ChessGame, Color, Move};

/// Identity of a game's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    fen: String,
    turn: Color,
    stack: Vec<Move>,
}

impl Fingerprint {
    /// Record the current state.
    pub fn capture<G: ChessGame + ?Sized>(game: &G) -> Self {
        Self {
            fen: game.fen(),
            turn: game.turn(),
            stack: game.move_stack().to_vec(),
        }
    }

    /// Panic unless `game` is back in the recorded state.
    pub fn assert_restored<G: ChessGame + ?Sized>(&self, game: &G, operation: &str) {
        let now = Self::capture(game);
        assert!(
            *self == now,
            "{operation} left the game mutated: expected {} ({} moves), found {} ({} moves)",
            self.fen,
            self.stack.len(),
            now.fen,
            now.stack.len()
        );
    }
}

/// Plays moves forward; pops them again when dropped.
pub struct Advance<'g, G: ChessGame + ?Sized> {
    game: &'g mut G,
    applied: usize,
}

impl<'g, G: ChessGame + ?Sized> Advance<'g, G> {
    /// Start with nothing applied.
    pub fn new(game: &'g mut G) -> Self {
        Self { game, applied: 0 }
    }

    /// Play one move on top of the borrowed game.
    pub fn push(&mut self, mv: Move) -> Result<(), crate::chess::GameError> {
        self.game.push(mv)?;
        self.applied += 1;
        Ok(())
    }

    /// The game in its advanced state.
    pub fn game(&self) -> &G {
        &*self.game
    }

    /// Moves currently applied.
    pub const fn applied(&self) -> usize {
        self.applied
    }
}

impl<G: ChessGame + ?Sized> Drop for Advance<'_, G> {
    fn drop(&mut self) {
        while self.applied > 0 {
            if self.game.pop().is_none() {
                panic!("move stack underflow while undoing {} moves", self.applied);
            }
            self.applied -= 1;
        }
    }
}

/// Takes moves back; replays them in original order when dropped.
pub struct Rewind<'g, G: ChessGame + ?Sized> {
    game: &'g mut G,
    undone: Vec<Move>,
}

impl<'g, G: ChessGame + ?Sized> Rewind<'g, G> {
    /// Start with nothing undone.
    pub fn new(game: &'g mut G) -> Self {
        Self {
            game,
            undone: Vec::new(),
        }
    }

    /// Take back the most recent move still on the stack.
    pub fn pop(&mut self) -> Option<Move> {
        let mv = self.game.pop()?;
        self.undone.push(mv);
        Some(mv)
    }

    /// The game in its rewound state.
    pub fn game(&self) -> &G {
        &*self.game
    }
}

impl<G: ChessGame + ?Sized> Drop for Rewind<'_, G> {
    fn drop(&mut self) {
        while let Some(mv) = self.undone.pop() {
            if let Err(e) = self.game.push(mv) {
                panic!("failed to replay {mv} while restoring the move stack: {e}");
            }
        }
    }
}

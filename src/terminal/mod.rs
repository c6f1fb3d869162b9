//! Terminal agent.
//!
//! Draws the board with the recent move history next to it, keeps a
//! one-line engine status under it, and turns typed lines into queued
//! commands. Pieces are shown as unicode figures or FEN letters.

mod agent;
pub mod commands;
pub mod glyphs;
mod input;
pub mod output;
pub mod render;

pub use agent::TerminalAgent;
pub use commands::{classify, CommandError, Dispatch};
pub use glyphs::{GlyphMode, MoveFlags, MoveSymbols};
pub use input::PendingMoves;
pub use output::OutputBuffer;
pub use render::{render_board, render_info, render_move_history, BOARD_LINES, MOVE_FIELD_WIDTH};

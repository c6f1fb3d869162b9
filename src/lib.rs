//! # Chess Agents
//!
//! Pluggable input/output agents for a queue-driven chess controller.
//!
//! The controller owns the game and a message queue. Agents are driven
//! synchronously by the controller to display the game, and push typed
//! commands back onto the queue from their own threads.
//!
//! ## Core Concepts
//!
//! - **Message queue**: unbounded MPSC channel of [`Message`]s, agents only send
//! - **Snapshots**: device-agnostic positions for the current board or a look-ahead line
//! - **Board agent**: configures a sensor board and animates engine variants on its LEDs
//! - **Terminal agent**: ANSI board with move history, status line, keyboard commands
//!
//! ## Example
//!
//! ```rust,no_run
//! use chess_agents::{message_queue, Agent, AgentsConfig, ShakmatyGame, TerminalAgent};
//!
//! let config = AgentsConfig::load(None)?;
//! let (tx, rx) = message_queue();
//! let mut terminal = TerminalAgent::spawn(tx, config.terminal)?;
//!
//! let mut game = ShakmatyGame::new();
//! terminal.display_board(&mut game)?;
//! if let Some(message) = rx.try_recv() {
//!     println!("{}", message.to_json());
//! }
//! # Ok::<(), chess_agents::AgentError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod agent;
pub mod board;
pub mod chess;
pub mod config;
pub mod error;
pub mod logging;
pub mod queue;
pub mod snapshot;
pub mod terminal;

// Re-exports for convenience
pub use agent::{Agent, AgentState, EngineInfo, MoveMap, Score};
pub use board::{BoardAgent, DeviceError, SensorBoard};
pub use chess::{ChessGame, Color, GameError, Move, Piece, PieceKind, ShakmatyGame, Square};
pub use config::{AgentsConfig, BoardAgentConfig, TerminalAgentConfig};
pub use error::{AgentError, Result};
pub use logging::init_logging;
pub use queue::{message_queue, Command, Message, MessageReceiver, MessageSender};
pub use snapshot::{BoardSnapshot, SnapshotError};
pub use terminal::{GlyphMode, TerminalAgent};

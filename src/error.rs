//! Crate-level error type.

use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::board::DeviceError;
use crate::chess::GameError;
use crate::config::ConfigError;

/// Errors surfaced by agent operations.
///
/// Expected conditions (init timeout, bad keyboard input) are absorbed by
/// the agents and only logged; these are what remains.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The sensor board never reported a position.
    #[error("no board position received within {0:?}")]
    Timeout(Duration),

    /// The device driver failed.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// The rules collaborator rejected a move.
    #[error("game error: {0}")]
    Game(#[from] GameError),

    /// A background thread could not be started.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Thread name.
        name: String,
        /// OS error.
        source: io::Error,
    },

    /// Writing to the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used across the crate.
pub type Result<T, E = AgentError> = std::result::Result<T, E>;

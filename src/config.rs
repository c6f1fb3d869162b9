//! Agent configuration types and loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Hard ceiling on plies a sensor board animates.
pub const BOARD_MAX_PLIES: usize = 4;

/// Ceiling on the `h <ply>` hint look-ahead typed on the terminal.
///
/// Kept apart from [`BOARD_MAX_PLIES`]: one bounds what the user may ask
/// for, the other what the device can show.
pub const HINT_MAX_PLIES: i64 = 4;

/// Project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".chess-agents.yml";

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// File is not valid YAML for [`AgentsConfig`].
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: serde_yaml::Error,
    },
}

/// Configuration for every agent in the process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentsConfig {
    /// Terminal agent settings.
    pub terminal: TerminalAgentConfig,

    /// Sensor board agent settings.
    pub board: BoardAgentConfig,
}

impl AgentsConfig {
    /// Load configuration with fallback chain.
    ///
    /// An explicit path must load. Otherwise the project-local file is tried,
    /// and defaults are used when it is absent or unreadable.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }
}

/// Terminal agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalAgentConfig {
    /// Actor tag on queued messages.
    pub name: String,

    /// Draw pieces with unicode figures instead of letters.
    #[serde(rename = "unicode-figures")]
    pub unicode_figures: bool,

    /// Variant moves shown on the status line.
    #[serde(rename = "max-plies")]
    pub max_plies: usize,

    /// Pause after a failed keyboard read, in milliseconds.
    #[serde(rename = "read-backoff-ms")]
    pub read_backoff_ms: u64,
}

impl TerminalAgentConfig {
    /// Pause after a failed keyboard read.
    pub const fn read_backoff(&self) -> Duration {
        Duration::from_millis(self.read_backoff_ms)
    }
}

impl Default for TerminalAgentConfig {
    fn default() -> Self {
        Self {
            name: "TerminalAgent".to_string(),
            unicode_figures: true,
            max_plies: 6,
            read_backoff_ms: 1000,
        }
    }
}

/// Sensor board agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardAgentConfig {
    /// Actor tag.
    pub name: String,

    /// How long to wait for the board to report a position, in milliseconds.
    #[serde(rename = "init-timeout-ms")]
    pub init_timeout_ms: u64,

    /// Interval between position checks during initialization, in milliseconds.
    #[serde(rename = "poll-interval-ms")]
    pub poll_interval_ms: u64,

    /// Sensor debounce level.
    pub debounce: u8,

    /// Board scan interval in milliseconds.
    #[serde(rename = "scan-time-ms")]
    pub scan_time_ms: f64,

    /// Plies of engine variant shown on the board.
    #[serde(rename = "max-plies")]
    pub max_plies: usize,

    /// LED animation refresh frequency.
    #[serde(rename = "animation-frequency")]
    pub animation_frequency: u32,
}

impl BoardAgentConfig {
    /// Initialization timeout.
    pub const fn init_timeout(&self) -> Duration {
        Duration::from_millis(self.init_timeout_ms)
    }

    /// Interval between position checks.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for BoardAgentConfig {
    fn default() -> Self {
        Self {
            name: "ChessLinkAgent".to_string(),
            init_timeout_ms: 30_000,
            poll_interval_ms: 100,
            debounce: 4,
            scan_time_ms: 100.0,
            max_plies: 3,
            animation_frequency: 80,
        }
    }
}

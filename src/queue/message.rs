//! Command messages placed on the controller queue.
//!
//! The serialized form is the contract with the controller: every message is
//! a flat map keyed by the command name, with the originating agent in
//! `"actor"`. Moves nest the actor inside the `"move"` object.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Side selector for `analyze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzeSide {
    /// Side to move.
    Current,
    /// Black.
    Black,
    /// White.
    White,
}

impl AnalyzeSide {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "",
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// Side selector for `go`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoSide {
    /// Side to move.
    Current,
    /// Force a White move.
    White,
    /// Force a Black move.
    Black,
}

impl GoSide {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

/// The fixed command vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Play a move given in UCI notation.
    Move {
        /// UCI move string.
        uci: String,
    },
    /// Start a new game.
    NewGame,
    /// Take back a move.
    Back,
    /// Flip the e-board cable orientation.
    TurnOrientation,
    /// Start analysis.
    Analyze(AnalyzeSide),
    /// Switch board encoding.
    Encoding,
    /// Engine think time.
    Level {
        /// Seconds per move.
        movetime: f64,
    },
    /// Maximum plies shown during look-ahead.
    MaxPly(i64),
    /// Import the e-board position.
    Position,
    /// Let the engine move.
    Go(GoSide),
    /// Persist current preferences.
    WritePrefs,
    /// Show a hint this many plies deep on the board.
    Hint {
        /// Clamped look-ahead.
        ply: u8,
    },
    /// Stop the engine.
    Stop,
    /// Set up a position.
    Fen(String),
}

impl Command {
    /// The message key the controller dispatches on.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::NewGame => "new game",
            Self::Back => "back",
            Self::TurnOrientation => "turn eboard orientation",
            Self::Analyze(_) => "analyze",
            Self::Encoding => "encoding",
            Self::Level { .. } => "level",
            Self::MaxPly(_) => "max_ply",
            Self::Position => "position",
            Self::Go(_) => "go",
            Self::WritePrefs => "write_prefs",
            Self::Hint { .. } => "hint",
            Self::Stop => "stop",
            Self::Fen(_) => "fen",
        }
    }
}

/// A command tagged with the agent that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Name of the originating agent.
    pub actor: String,
    /// The command itself.
    pub command: Command,
}

impl Message {
    /// Create a message.
    pub fn new(actor: impl Into<String>, command: Command) -> Self {
        Self {
            actor: actor.into(),
            command,
        }
    }

    /// Shorthand for [`Command::key`].
    pub const fn key(&self) -> &'static str {
        self.command.key()
    }

    /// Serialize to the wire representation.
    pub fn to_json(&self) -> serde_json::Value {
        // Only string keys and plain values are produced, which cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

struct MovePayload<'a> {
    uci: &'a str,
    actor: &'a str,
}

impl Serialize for MovePayload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("uci", self.uci)?;
        map.serialize_entry("actor", self.actor)?;
        map.end()
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.key();
        let mut map = serializer.serialize_map(None)?;
        match &self.command {
            Command::Move { uci } => {
                map.serialize_entry(
                    key,
                    &MovePayload {
                        uci,
                        actor: &self.actor,
                    },
                )?;
                return map.end();
            }
            Command::Analyze(side) => map.serialize_entry(key, side.as_str())?,
            Command::Go(side) => map.serialize_entry(key, side.as_str())?,
            Command::Level { movetime } => {
                map.serialize_entry(key, "")?;
                map.serialize_entry("movetime", movetime)?;
            }
            Command::MaxPly(n) => map.serialize_entry(key, n)?,
            Command::Hint { ply } => {
                map.serialize_entry(key, "")?;
                map.serialize_entry("ply", ply)?;
            }
            Command::Fen(fen) => map.serialize_entry(key, fen)?,
            Command::NewGame
            | Command::Back
            | Command::TurnOrientation
            | Command::Encoding
            | Command::Position
            | Command::WritePrefs
            | Command::Stop => map.serialize_entry(key, "")?,
        }
        map.serialize_entry("actor", &self.actor)?;
        map.end()
    }
}

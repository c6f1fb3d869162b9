//! Engine output handed to agents for display.

use std::fmt;

use crate::chess::Move;

/// Engine evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawns from the side to move's point of view.
    Centipawns(i32),
    /// Mate in this many moves (negative: getting mated).
    Mate(i32),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Centipawns(cp) => write!(f, "{:.2}", f64::from(cp) / 100.0),
            Self::Mate(n) => write!(f, "#{n}"),
        }
    }
}

/// Search info, every field optional.
///
/// Agents only read this; it is rebuilt by the controller for each update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineInfo {
    /// Evaluation.
    pub score: Option<Score>,
    /// Nodes per second.
    pub nps: Option<u64>,
    /// Nominal search depth.
    pub depth: Option<u32>,
    /// Selective search depth.
    pub seldepth: Option<u32>,
    /// Principal variation.
    pub variant: Option<Vec<Move>>,
}

impl EngineInfo {
    /// Empty info.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score.
    #[must_use]
    pub const fn with_score(mut self, score: Score) -> Self {
        self.score = Some(score);
        self
    }

    /// Set nodes per second.
    #[must_use]
    pub const fn with_nps(mut self, nps: u64) -> Self {
        self.nps = Some(nps);
        self
    }

    /// Set depth and optional selective depth.
    #[must_use]
    pub const fn with_depth(mut self, depth: u32, seldepth: Option<u32>) -> Self {
        self.depth = Some(depth);
        self.seldepth = seldepth;
        self
    }

    /// Set the principal variation.
    #[must_use]
    pub fn with_variant(mut self, variant: Vec<Move>) -> Self {
        self.variant = Some(variant);
        self
    }
}

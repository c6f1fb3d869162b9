//! Agent lifecycle state shared with a background thread.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AgentState {
    /// Not yet usable.
    Inactive = 0,
    /// Initialized and serving.
    Active = 1,
}

/// State cell written by exactly one thread and readable from any.
///
/// There is no way back from [`AgentState::Active`].
#[derive(Debug, Clone, Default)]
pub struct SharedState(Arc<AtomicU8>);

impl SharedState {
    /// Starts inactive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn get(&self) -> AgentState {
        match self.0.load(Ordering::Acquire) {
            0 => AgentState::Inactive,
            _ => AgentState::Active,
        }
    }

    /// Move to [`AgentState::Active`].
    ///
    /// Returns `true` on the first transition.
    pub fn activate(&self) -> bool {
        self.0.swap(AgentState::Active as u8, Ordering::AcqRel) == AgentState::Inactive as u8
    }
}

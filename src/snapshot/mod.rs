//! Board-state snapshotter.
//!
//! Converts a borrowed, live game into device-agnostic position snapshots,
//! either for the current position or for a short look-ahead line. Any
//! transient mutation of the game is undone through the guards in
//! [`guard`].

pub mod guard;
mod position;
mod variant;

pub use guard::{Advance, Fingerprint, Rewind};
pub use position::{snapshot, BoardSnapshot, SnapshotError};
pub use variant::variant_snapshots;

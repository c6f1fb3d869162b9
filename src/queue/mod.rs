//! Shared message queue: typed, fire-and-forget commands from agents to the
//! controller.
//!
//! ```text
//! ┌────────────────┐
//! │ Terminal Agent │ ──┐
//! └────────────────┘   │   Message    ┌────────────┐
//!                      ├────────────▶ │ Controller │
//! ┌────────────────┐   │              └────────────┘
//! │  Board Driver  │ ──┘
//! └────────────────┘
//! ```
//!
//! Nothing flows back: the controller never replies on the queue.

mod channel;
mod message;

pub use channel::{message_queue, MessageReceiver, MessageSender, QueueClosed};
pub use message::{AnalyzeSide, Command, GoSide, Message};

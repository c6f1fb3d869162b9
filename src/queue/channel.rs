//! The agent → controller channel.
//!
//! Multi-producer, single-consumer, unbounded. Agents hold cloned
//! [`MessageSender`]s and only ever append.

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;
use thiserror::Error;

use super::Message;

/// The controller hung up.
#[derive(Debug, Error)]
#[error("message queue disconnected")]
pub struct QueueClosed(pub Message);

/// Create a connected sender/receiver pair.
pub fn message_queue() -> (MessageSender, MessageReceiver) {
    let (tx, rx) = unbounded();
    (MessageSender { tx }, MessageReceiver { rx })
}

/// Append-only handle held by agents.
#[derive(Debug, Clone)]
pub struct MessageSender {
    tx: Sender<Message>,
}

impl MessageSender {
    /// Append a message.
    pub fn put(&self, message: Message) -> Result<(), QueueClosed> {
        self.tx.send(message).map_err(|e| QueueClosed(e.into_inner()))
    }
}

/// Consuming end held by the controller.
#[derive(Debug)]
pub struct MessageReceiver {
    rx: Receiver<Message>,
}

impl MessageReceiver {
    /// Poll for the next message (non-blocking).
    pub fn try_recv(&self) -> Option<Message> {
        match self.rx.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next message (blocking with timeout).
    ///
    /// Returns `None` on timeout or once every sender is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Message> {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => Some(message),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drain all pending messages.
    pub fn drain(&self) -> Vec<Message> {
        let mut messages = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// No messages queued.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

//! Input Actor: dedicated thread reading command lines.
//!
//! Reads block indefinitely, so the thread is not joined on shutdown; it
//! ends on its own at end of input.

use std::io::BufRead;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::commands::{classify, Dispatch, HELP_TEXT};
use crate::agent::SharedState;
use crate::error::{AgentError, Result};
use crate::queue::{Command, Message, MessageSender};

/// Moves the user may type, shared with the controller thread.
pub type PendingMoves = Arc<Mutex<Vec<String>>>;

/// Everything the input thread needs.
pub struct InputContext {
    /// Actor tag for queued messages.
    pub actor: String,
    /// Where commands go.
    pub queue: MessageSender,
    /// Set active on the first successful read.
    pub state: SharedState,
    /// Moves currently on offer.
    pub pending: PendingMoves,
    /// Pause after a failed read.
    pub backoff: Duration,
}

/// Input actor reading lines from a blocking source.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
}

impl InputActor {
    /// Spawn the input thread.
    pub fn spawn<R>(reader: R, context: InputContext) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let name = "chess-agents-input".to_string();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || Self::run_loop(reader, &context))
            .map_err(|source| AgentError::Spawn { name, source })?;

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Whether the thread has stopped (end of input).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the input thread to finish.
    ///
    /// Only returns once the reader reaches end of input.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main read loop.
    fn run_loop<R: BufRead>(mut reader: R, context: &InputContext) {
        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) => {
                    debug!(actor = %context.actor, "end of input");
                    break;
                }
                Ok(_) => {
                    if context.state.activate() {
                        debug!(actor = %context.actor, "input active");
                    }
                    if !Self::handle_line(line.trim(), context) {
                        break;
                    }
                }
                Err(e) => {
                    warn!(actor = %context.actor, error = %e, "failed to read input");
                    thread::sleep(context.backoff);
                }
            }
        }
    }

    /// Returns `false` once the controller has gone away.
    fn handle_line(input: &str, context: &InputContext) -> bool {
        if input.is_empty() {
            return true;
        }
        debug!(actor = %context.actor, input, "keyboard");

        let dispatch = {
            let mut pending = context
                .pending
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let dispatch = classify(input, &pending);
            if matches!(dispatch, Dispatch::Move(_)) {
                pending.clear();
            }
            dispatch
        };

        let command = match dispatch {
            Dispatch::Move(uci) => Command::Move { uci },
            Dispatch::Command(command) => command,
            Dispatch::Help => {
                for line in HELP_TEXT {
                    println!("{line}");
                }
                return true;
            }
            Dispatch::Unknown => {
                info!(
                    "Unknown keyboard cmd <{input}>, enter \"help\" for a list of valid commands."
                );
                return true;
            }
            Dispatch::Invalid(e) => {
                info!(error = %e, "ignoring command <{input}>");
                return true;
            }
        };

        debug!(actor = %context.actor, key = command.key(), "queueing command");
        match context.queue.put(Message::new(context.actor.as_str(), command)) {
            Ok(()) => true,
            Err(e) => {
                warn!(actor = %context.actor, key = e.0.key(), "controller queue closed");
                false
            }
        }
    }
}

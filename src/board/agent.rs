//! Agent driving a sensor board's LEDs from engine output.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, trace};

use super::device::SensorBoard;
use crate::agent::{Agent, EngineInfo, MoveMap};
use crate::chess::{ChessGame, Color, Move};
use crate::config::{BoardAgentConfig, BOARD_MAX_PLIES};
use crate::error::{AgentError, Result};
use crate::snapshot::variant_snapshots;

/// Map the side to move onto the driver's color enumeration.
pub fn device_color<D: SensorBoard>(turn: Color) -> D::Color {
    match turn {
        Color::White => D::WHITE,
        Color::Black => D::BLACK,
    }
}

/// Agent for one physical sensor board.
///
/// Construction configures the board and waits, bounded by the configured
/// timeout, for it to report a position. A board that never answers leaves
/// the agent constructed but not ready; visualization calls are then no-ops.
pub struct BoardAgent<D: SensorBoard> {
    /// Driver handle.
    device: D,
    /// Configuration.
    config: BoardAgentConfig,
    /// Whether the board reported a position in time.
    ready: bool,
}

impl<D: SensorBoard> BoardAgent<D> {
    /// Configure the board and wait for its first position.
    ///
    /// Never fails: problems are logged and reflected in
    /// [`BoardAgent::agent_ready`].
    pub fn new(device: D, config: BoardAgentConfig) -> Self {
        let mut agent = Self {
            device,
            config,
            ready: false,
        };
        match agent.initialize() {
            Ok(()) => {
                debug!("board position received, init ok.");
                agent.ready = true;
            }
            Err(e) => error!(agent = %agent.config.name, "board initialization failed: {e}"),
        }
        agent
    }

    fn initialize(&mut self) -> Result<()> {
        self.device.query_version()?;
        self.device.set_debounce(self.config.debounce)?;
        self.device.query_scan_time()?;
        self.device.set_scan_time_ms(self.config.scan_time_ms)?;
        self.device.query_scan_time()?;
        self.device.request_position()?;

        debug!("waiting for board position");
        let timeout = self.config.init_timeout();
        if wait_until(timeout, self.config.poll_interval(), || {
            self.device.position_initialized()
        }) {
            Ok(())
        } else {
            Err(AgentError::Timeout(timeout))
        }
    }

    /// The driver.
    pub const fn device(&self) -> &D {
        &self.device
    }

    /// Configuration in use.
    pub const fn config(&self) -> &BoardAgentConfig {
        &self.config
    }

    /// Whether the board reported a position during initialization.
    pub const fn agent_ready(&self) -> bool {
        self.ready
    }

    /// Animate a principal variation on the board, at most
    /// [`BOARD_MAX_PLIES`] plies deep.
    pub fn visualize_variant<G: ChessGame + ?Sized>(
        &mut self,
        game: &mut G,
        moves: &[Move],
        plies: usize,
        frequency: u32,
    ) -> Result<()> {
        if !self.ready {
            trace!("board not ready, variant not shown");
            return Ok(());
        }
        let plies = plies.min(BOARD_MAX_PLIES);
        let device = &self.device;
        let positions = variant_snapshots(game, moves, plies, |fen| device.fen_to_position(fen))?;
        self.device.show_deltas(&positions, frequency)?;
        Ok(())
    }
}

impl<D: SensorBoard> Agent for BoardAgent<D> {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn agent_ready(&self) -> bool {
        self.ready
    }

    fn display_info(&mut self, game: &mut dyn ChessGame, info: &EngineInfo) -> Result<()> {
        if let Some(variant) = &info.variant {
            let plies = self.config.max_plies;
            let frequency = self.config.animation_frequency;
            self.visualize_variant(game, variant, plies, frequency)?;
        }
        Ok(())
    }

    fn set_valid_moves(&mut self, game: &dyn ChessGame, moves: Option<&MoveMap>) -> Result<()> {
        if !self.ready {
            trace!("board not ready, moves not highlighted");
            return Ok(());
        }
        let color = device_color::<D>(game.turn());
        let empty = MoveMap::new();
        self.device
            .move_from(&game.fen(), moves.unwrap_or(&empty), color)?;
        Ok(())
    }
}

/// Poll `condition` every `interval` until it holds or `timeout` elapses.
///
/// The condition is checked at least once, and once more at the deadline.
fn wait_until(timeout: Duration, interval: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    loop {
        if condition() {
            return true;
        }
        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return false;
        }
        thread::sleep(interval.min(timeout - elapsed));
    }
}

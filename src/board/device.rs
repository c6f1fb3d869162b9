//! The capability interface the board agent needs from a sensor-board driver.

use thiserror::Error;

use crate::agent::MoveMap;

/// Errors reported by a board driver.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// No connection to the board.
    #[error("board not connected")]
    NotConnected,

    /// The board answered with something unexpected.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Transport failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A sensor board with LED feedback.
///
/// Queries are fire-and-forget: the driver's own thread collects the
/// answers, and [`SensorBoard::position_initialized`] reports when the
/// first full position has arrived.
pub trait SensorBoard {
    /// The driver's own encoding of a board position.
    type Position;

    /// The driver's own color enumeration.
    type Color: Copy;

    /// Driver value for White.
    const WHITE: Self::Color;

    /// Driver value for Black.
    const BLACK: Self::Color;

    /// Ask for firmware version and capabilities.
    fn query_version(&mut self) -> Result<(), DeviceError>;

    /// Set the sensor debounce level.
    fn set_debounce(&mut self, level: u8) -> Result<(), DeviceError>;

    /// Ask for the current scan interval.
    fn query_scan_time(&mut self) -> Result<(), DeviceError>;

    /// Set the scan interval.
    fn set_scan_time_ms(&mut self, millis: f64) -> Result<(), DeviceError>;

    /// Ask for the current piece placement.
    fn request_position(&mut self) -> Result<(), DeviceError>;

    /// Whether a full position has been received.
    fn position_initialized(&self) -> bool;

    /// Encode a FEN export.
    fn fen_to_position(&self, fen: &str) -> Self::Position;

    /// Animate the LED differences between consecutive positions.
    fn show_deltas(
        &mut self,
        positions: &[Self::Position],
        frequency: u32,
    ) -> Result<(), DeviceError>;

    /// Highlight the given moves for the position `fen`, for `color` to move.
    fn move_from(
        &mut self,
        fen: &str,
        moves: &MoveMap,
        color: Self::Color,
    ) -> Result<(), DeviceError>;
}

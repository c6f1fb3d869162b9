//! Physical sensor-board agent.
//!
//! The board driver (connection, firmware protocol, LED primitives) lives
//! outside this crate behind [`SensorBoard`]. The agent only configures the
//! board, waits for it to come up, and turns engine output into LED
//! animations.

mod agent;
mod device;

pub use agent::{device_color, BoardAgent};
pub use device::{DeviceError, SensorBoard};

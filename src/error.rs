//! Crate level error type

use crate::hardware::BusError;
use crate::output::SinkError;

/// Anything that can stop the poll loop
///
/// Every variant is fatal for the poll loop, there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum JoystickError {
    /// Pin read or port configuration failed
    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    /// The virtual input device rejected an event
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

//! Pin sources - digital inputs read over a bus
//!
//! The joystick core only ever sees the [`PinSource`] trait. A source is
//! configured once (direction, pull-ups, optional inversion) and then polled
//! pin by pin on every cycle.
//!
//! ```text
//! IO Pi Plus ──I2C──► IoPiBus (PinSource) ──► InputProfile::tick()
//! ```

pub mod iopi;

pub use iopi::IoPiBus;

use crate::input::button::LogicalButton;

/// Every port on the expander is 8 pins wide; configuration always targets all of them
pub const ALL_PINS: u8 = 0xFF;

/// One 8-pin port of a 16-pin expander
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    /// Pins 1-8
    A,
    /// Pins 9-16
    B,
}

impl Port {
    pub const BOTH: [Port; 2] = [Port::A, Port::B];
}

/// Errors raised by a pin source
///
/// None of these are retried. A failing bus stops the poll loop.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// Low level I2C failure reported by the Raspberry Pi peripheral
    #[error("I2C error: {0}")]
    I2c(#[from] rppal::i2c::Error),

    /// Pin number outside the 1..=16 range of the expander
    #[error("Invalid pin {0}, expected 1..=16")]
    InvalidPin(u8),

    /// The source cannot serve reads at all
    #[error("Bus unavailable: {0}")]
    Unavailable(String),
}

/// Digital pin source consumed by the joystick core
pub trait PinSource {
    /// Reads one pin; the raw value is 0 or 1
    fn read_pin(&mut self, pin: LogicalButton) -> Result<u8, BusError>;

    /// Sets the port direction, a set bit means input
    fn set_port_direction(&mut self, port: Port, mask: u8) -> Result<(), BusError>;

    /// Enables the internal pull-up resistors for the set bits
    fn set_port_pullups(&mut self, port: Port, mask: u8) -> Result<(), BusError>;

    /// Inverts the reported logic level for the set bits
    fn invert_port(&mut self, port: Port, mask: u8) -> Result<(), BusError>;
}

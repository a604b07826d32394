//! Event sinks - where press/release transitions end up
//!
//! A sink is declared once with the full channel set in [`Channel::ALL`] and
//! then receives `(channel, value)` pairs. [`EventSink::send`] queues a single
//! event, [`EventSink::flush`] publishes everything queued so far as one
//! update.

#[cfg(feature = "uinput")]
pub mod uinput;

#[cfg(feature = "uinput")]
pub use uinput::UinputSink;

use tracing::info;

// Stick positions on the 0..=255 axis range
pub const JOYSTICK_NEUTRAL_VALUE: i32 = 128;
pub const JOYSTICK_LEFT_VALUE: i32 = 0;
pub const JOYSTICK_RIGHT_VALUE: i32 = 255;
pub const JOYSTICK_UP_VALUE: i32 = 0;
pub const JOYSTICK_DOWN_VALUE: i32 = 255;

// Key values the input subsystem expects
pub const BUTTON_PRESS_VALUE: i32 = 1;
pub const BUTTON_RELEASE_VALUE: i32 = 0;

/// Every axis and button the virtual gamepad declares
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    AbsX,
    AbsY,
    BtnThumbL,
    BtnThumbR,
    BtnA,
    BtnB,
    BtnX,
    BtnY,
    BtnC,
    BtnZ,
    BtnStart,
    BtnBack,
    BtnForward,
    BtnSelect,
}

impl Channel {
    // BTN_LEFT / BTN_RIGHT are left out on purpose, they break gamepad detection
    pub const ALL: [Channel; 14] = [
        Channel::AbsX,
        Channel::AbsY,
        Channel::BtnThumbL,
        Channel::BtnThumbR,
        Channel::BtnA,
        Channel::BtnB,
        Channel::BtnX,
        Channel::BtnY,
        Channel::BtnC,
        Channel::BtnZ,
        Channel::BtnStart,
        Channel::BtnBack,
        Channel::BtnForward,
        Channel::BtnSelect,
    ];

    pub fn is_axis(self) -> bool {
        matches!(self, Channel::AbsX | Channel::AbsY)
    }
}

/// Errors raised while emitting
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the device failed
    #[error("Device write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The virtual device could not be created
    #[error("Device creation failed: {0}")]
    DeviceCreation(String),
}

/// Virtual input device consumed by the joystick core
pub trait EventSink {
    /// Queues one event without publishing it
    fn send(&mut self, channel: Channel, value: i32) -> Result<(), SinkError>;

    /// Publishes all queued events as one update
    fn flush(&mut self) -> Result<(), SinkError>;

    /// Sends and publishes a single event
    fn emit(&mut self, channel: Channel, value: i32) -> Result<(), SinkError> {
        self.send(channel, value)?;
        self.flush()
    }
}

/// Sink that only logs, for running without a uinput device
#[derive(Debug, Default)]
pub struct LogSink {
    pending: Vec<(Channel, i32)>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for LogSink {
    fn send(&mut self, channel: Channel, value: i32) -> Result<(), SinkError> {
        self.pending.push((channel, value));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        for (channel, value) in self.pending.drain(..) {
            info!("Emit {:?} = {}", channel, value);
        }
        Ok(())
    }
}

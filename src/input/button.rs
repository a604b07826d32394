use tracing::{debug, trace};

use super::polarity::Polarity;
use crate::error::JoystickError;
use crate::hardware::PinSource;
use crate::output::{Channel, EventSink, BUTTON_PRESS_VALUE, BUTTON_RELEASE_VALUE};

/// Physical pin position on an expander, numbered 1..=16
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LogicalButton(u8);

impl LogicalButton {
    // Common bus inputs
    pub const JOYSTICK_LEFT: Self = Self(1);
    pub const JOYSTICK_RIGHT: Self = Self(2);
    pub const JOYSTICK_UP: Self = Self(3);
    pub const JOYSTICK_DOWN: Self = Self(4);
    pub const BUTTON_1: Self = Self(5);
    pub const BUTTON_2: Self = Self(6);
    pub const BUTTON_3: Self = Self(7);
    pub const BUTTON_4: Self = Self(8);
    pub const BUTTON_5: Self = Self(9);
    pub const BUTTON_6: Self = Self(10);
    pub const BUTTON_7: Self = Self(11);
    pub const BUTTON_8: Self = Self(12);
    /// The P1/P2 button
    pub const PLAYER_START: Self = Self(13);

    // Bus 1 only
    pub const BUS1_BACK: Self = Self(14);
    pub const BUS1_COIN: Self = Self(15);
    pub const BUS1_WHITE: Self = Self(16);

    // Bus 2 only, pin 15 is unused
    pub const BUS2_BLACK: Self = Self(14);
    pub const BUS2_POWER: Self = Self(16);

    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Press/release state machine for one logical button
///
/// Emits exactly one event per state change and nothing while the input is
/// steady. A button without a channel still tracks its state so that
/// post-processing (the power button) can look at it.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonState {
    pin: LogicalButton,
    channel: Option<Channel>,
    press_value: Option<i32>,
    release_value: Option<i32>,
    pressed: bool,
}

impl ButtonState {
    /// Ordinary button emitting 1 on press and 0 on release
    pub fn button(pin: LogicalButton, channel: Channel) -> Self {
        Self::with_values(
            pin,
            Some(channel),
            Some(BUTTON_PRESS_VALUE),
            Some(BUTTON_RELEASE_VALUE),
        )
    }

    /// One direction of a digital stick; release recenters the axis
    pub fn axis_edge(pin: LogicalButton, axis: Channel, press_value: i32, neutral: i32) -> Self {
        Self::with_values(pin, Some(axis), Some(press_value), Some(neutral))
    }

    /// Tracks the pin but never emits
    pub fn silent(pin: LogicalButton) -> Self {
        Self::with_values(pin, None, None, None)
    }

    pub fn with_values(
        pin: LogicalButton,
        channel: Option<Channel>,
        press_value: Option<i32>,
        release_value: Option<i32>,
    ) -> Self {
        Self {
            pin,
            channel,
            press_value,
            release_value,
            pressed: false,
        }
    }

    pub fn pin(&self) -> LogicalButton {
        self.pin
    }

    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    pub fn release_value(&self) -> Option<i32> {
        self.release_value
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Reads the pin, updates the pressed flag and emits on a transition
    ///
    /// Returns the pressed flag after the read. Bus and sink errors are
    /// passed straight up; the flag is only committed once the emission for
    /// the transition went through.
    pub fn read_and_update(
        &mut self,
        source: &mut dyn PinSource,
        sink: &mut dyn EventSink,
        polarity: Polarity,
    ) -> Result<bool, JoystickError> {
        let raw = source.read_pin(self.pin)?;
        let pin_pressed = polarity.is_pressed(raw);
        trace!("Pin {:>2}: {}", self.pin.number(), raw);

        let emission = match (pin_pressed, self.pressed) {
            (true, false) => self.press_value,
            (false, true) => self.release_value,
            _ => return Ok(self.pressed),
        };

        if let (Some(channel), Some(value)) = (self.channel, emission) {
            debug!(
                "Pin {} {} -> {:?} = {}",
                self.pin.number(),
                if pin_pressed { "pressed" } else { "released" },
                channel,
                value
            );
            sink.emit(channel, value)?;
        }
        self.pressed = pin_pressed;

        Ok(self.pressed)
    }
}

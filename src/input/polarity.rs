/// Raw value a press reads as with the stock wiring (push to ground, pull-ups on)
pub const DEFAULT_RAW_PRESS_VALUE: u8 = 0;

/// Active level shared by every pin on both buses
///
/// When inverted, the expander ports are inverted at configuration time so a
/// press reads as raw 1; otherwise a press reads as raw 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Polarity {
    #[default]
    ActiveLow,
    Inverted,
}

impl Polarity {
    /// Derives the polarity from the configured raw press value
    pub fn from_raw_press_value(raw_press_value: u8) -> Self {
        if raw_press_value != DEFAULT_RAW_PRESS_VALUE {
            Polarity::Inverted
        } else {
            Polarity::ActiveLow
        }
    }

    pub fn is_inverted(self) -> bool {
        self == Polarity::Inverted
    }

    /// Normalizes a raw pin sample to a pressed flag
    pub fn is_pressed(self, raw: u8) -> bool {
        match self {
            Polarity::Inverted => raw == 1,
            Polarity::ActiveLow => raw == 0,
        }
    }
}

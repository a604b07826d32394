use statum::{machine, state};
use tracing::{debug, info, warn};

use super::button::{ButtonState, LogicalButton};
use super::polarity::Polarity;
use crate::error::JoystickError;
use crate::hardware::{PinSource, Port, ALL_PINS};
use crate::output::{
    Channel, EventSink, JOYSTICK_DOWN_VALUE, JOYSTICK_LEFT_VALUE, JOYSTICK_NEUTRAL_VALUE,
    JOYSTICK_RIGHT_VALUE, JOYSTICK_UP_VALUE,
};
use crate::shutdown::ShutdownHook;

/// Number of buttons every player has (4 stick edges, 8 buttons, start)
pub const COMMON_BUTTON_COUNT: usize = 13;

/// Which cabinet side a profile drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    /// Bus 1: back, coin and white extras
    One,
    /// Bus 2: black button and the power button
    Two,
}

impl Player {
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Player::from_number)
            .ok_or_else(|| format!("invalid player '{}', expected 1 or 2", s))
    }
}

/// Stick edges, generic buttons and start, freshly built for each profile
pub fn common_buttons() -> Vec<ButtonState> {
    vec![
        ButtonState::axis_edge(
            LogicalButton::JOYSTICK_LEFT,
            Channel::AbsX,
            JOYSTICK_LEFT_VALUE,
            JOYSTICK_NEUTRAL_VALUE,
        ),
        ButtonState::axis_edge(
            LogicalButton::JOYSTICK_RIGHT,
            Channel::AbsX,
            JOYSTICK_RIGHT_VALUE,
            JOYSTICK_NEUTRAL_VALUE,
        ),
        ButtonState::axis_edge(
            LogicalButton::JOYSTICK_UP,
            Channel::AbsY,
            JOYSTICK_UP_VALUE,
            JOYSTICK_NEUTRAL_VALUE,
        ),
        ButtonState::axis_edge(
            LogicalButton::JOYSTICK_DOWN,
            Channel::AbsY,
            JOYSTICK_DOWN_VALUE,
            JOYSTICK_NEUTRAL_VALUE,
        ),
        ButtonState::button(LogicalButton::BUTTON_3, Channel::BtnA),
        ButtonState::button(LogicalButton::BUTTON_4, Channel::BtnB),
        ButtonState::button(LogicalButton::BUTTON_5, Channel::BtnC),
        ButtonState::button(LogicalButton::BUTTON_6, Channel::BtnX),
        ButtonState::button(LogicalButton::BUTTON_7, Channel::BtnY),
        ButtonState::button(LogicalButton::BUTTON_8, Channel::BtnZ),
        ButtonState::button(LogicalButton::BUTTON_1, Channel::BtnThumbL),
        ButtonState::button(LogicalButton::BUTTON_2, Channel::BtnThumbR),
        ButtonState::button(LogicalButton::PLAYER_START, Channel::BtnStart),
    ]
}

fn player_one_extras() -> Vec<ButtonState> {
    vec![
        ButtonState::button(LogicalButton::BUS1_BACK, Channel::BtnBack),
        ButtonState::button(LogicalButton::BUS1_COIN, Channel::BtnForward),
        ButtonState::button(LogicalButton::BUS1_WHITE, Channel::BtnSelect),
    ]
}

fn player_two_extras() -> Vec<ButtonState> {
    vec![
        ButtonState::button(LogicalButton::BUS2_BLACK, Channel::BtnSelect),
        // No emission, only drives the shutdown hook
        ButtonState::silent(LogicalButton::BUS2_POWER),
    ]
}

/// Power button position plus the side effect it drives
pub struct ShutdownWatch {
    index: usize,
    hook: Box<dyn ShutdownHook>,
}

#[state]
#[derive(Debug, Clone)]
pub enum ProfileState {
    Unconfigured,
    Ready,
}

/// One player's control surface on one expander
///
/// Created as `Unconfigured`; [`InputProfile::configure`] sets up the ports
/// once and hands back a `Ready` profile, the only state that can be polled.
#[machine]
pub struct InputProfile<S: ProfileState> {
    player: Player,
    bus_address: u8,
    source: Box<dyn PinSource>,
    polarity: Polarity,
    buttons: Vec<ButtonState>,
    shutdown: Option<ShutdownWatch>,
}

impl<S: ProfileState> InputProfile<S> {
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn bus_address(&self) -> u8 {
        self.bus_address
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Buttons in polling order
    pub fn buttons(&self) -> &[ButtonState] {
        &self.buttons
    }
}

impl InputProfile<Unconfigured> {
    /// Player 1: common set plus back, coin and white
    pub fn player_one(bus_address: u8, source: Box<dyn PinSource>, polarity: Polarity) -> Self {
        let mut buttons = common_buttons();
        buttons.extend(player_one_extras());

        Self::new(Player::One, bus_address, source, polarity, buttons, None)
    }

    /// Player 2: common set plus black and the power button
    pub fn player_two(
        bus_address: u8,
        source: Box<dyn PinSource>,
        polarity: Polarity,
        hook: Box<dyn ShutdownHook>,
    ) -> Self {
        let mut buttons = common_buttons();
        buttons.extend(player_two_extras());
        let shutdown = ShutdownWatch {
            index: buttons.len() - 1,
            hook,
        };

        Self::new(
            Player::Two,
            bus_address,
            source,
            polarity,
            buttons,
            Some(shutdown),
        )
    }

    /// Puts both ports into input mode with pull-ups, inverting them when
    /// the polarity asks for it
    pub fn configure(mut self) -> Result<InputProfile<Ready>, JoystickError> {
        info!(
            "Configuring player {} bus at {:#04x} ({:?})",
            self.player.number(),
            self.bus_address,
            self.polarity
        );

        for port in Port::BOTH {
            self.source.set_port_direction(port, ALL_PINS)?;
        }
        for port in Port::BOTH {
            self.source.set_port_pullups(port, ALL_PINS)?;
        }
        if self.polarity.is_inverted() {
            // Presses now read as 1 instead of 0
            for port in Port::BOTH {
                self.source.invert_port(port, ALL_PINS)?;
            }
        }

        debug!(
            "Player {} profile ready with {} buttons",
            self.player.number(),
            self.buttons.len()
        );
        Ok(self.transition())
    }
}

impl InputProfile<Ready> {
    /// One full pass over every button followed by post-processing
    pub fn tick(&mut self, sink: &mut dyn EventSink) -> Result<(), JoystickError> {
        for button in self.buttons.iter_mut() {
            button.read_and_update(&mut *self.source, sink, self.polarity)?;
        }
        self.post_process();
        Ok(())
    }

    /// Requests shutdown on every pass the power button is held
    fn post_process(&mut self) {
        if let Some(watch) = self.shutdown.as_mut() {
            if self.buttons[watch.index].is_pressed() {
                warn!("Shutdown requested by power button");
                watch.hook.request_shutdown();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_parses_only_one_and_two() {
        assert_eq!("1".parse::<Player>(), Ok(Player::One));
        assert_eq!("2".parse::<Player>(), Ok(Player::Two));
        assert!("0".parse::<Player>().is_err());
        assert!("3".parse::<Player>().is_err());
        assert!("one".parse::<Player>().is_err());
    }

    #[test]
    fn common_set_order() {
        let pins: Vec<u8> = common_buttons().iter().map(|b| b.pin().number()).collect();
        assert_eq!(pins, vec![1, 2, 3, 4, 7, 8, 9, 10, 11, 12, 5, 6, 13]);
        assert_eq!(common_buttons().len(), COMMON_BUTTON_COUNT);
    }

    #[test]
    fn stick_edges_recenter_on_release() {
        for edge in &common_buttons()[..4] {
            assert!(edge.channel().is_some_and(Channel::is_axis));
            assert_eq!(edge.release_value(), Some(JOYSTICK_NEUTRAL_VALUE));
        }
    }

    #[test]
    fn common_sets_are_independent() {
        let first = common_buttons();
        let second = common_buttons();
        assert_eq!(first, second);
        assert!(first.iter().all(|b| !b.is_pressed()));
    }
}

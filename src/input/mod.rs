//! Joystick subsystem - edge detection and event dispatch
//!
//! Implements the polling pipeline:
//!
//! 1. [`button`] - Per-button press/release state machine
//! 2. [`profile`] - One player's ordered button set on one expander
//! 3. [`poll_loop`] - Fixed cadence driver
//!
//! # Architecture
//!
//! ```text
//! PollLoop ──► InputProfile::tick() ──► ButtonState::read_and_update()
//!                     │                   PinSource::read_pin ─► Polarity ─► EventSink::emit
//!                     └─► post-process (power button)
//! ```
//!
//! Everything runs on one thread. The only suspension point is the sleep
//! between two passes.

pub mod button;
pub mod polarity;
pub mod poll_loop;
pub mod profile;

pub use button::{ButtonState, LogicalButton};
pub use polarity::Polarity;
pub use poll_loop::PollLoop;
pub use profile::{InputProfile, Player, ProfileState, Ready, Unconfigured};

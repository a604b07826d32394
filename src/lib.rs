//! IO Pi Plus arcade joystick
//!
//! Polls the two MCP23017 expanders of an IO Pi Plus board and forwards
//! joystick and button transitions to a virtual gamepad.

pub mod config;
pub mod error;
pub mod hardware;
pub mod input;
pub mod output;
pub mod shutdown;

pub use error::JoystickError;

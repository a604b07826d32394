//! Startup configuration
//!
//! Read once before any bus I/O and frozen for the lifetime of the process.
//! Every key is optional; missing keys fall back to the stock IO Pi Plus
//! wiring.
//!
//! ```toml
//! bus_1_address = 0x20
//! bus_2_address = 0x21
//! poll_interval_ms = 10
//! debug = false
//! button_press_raw_value = 0
//! shutdown_command = ["/usr/bin/sudo", "/sbin/poweroff"]
//! device_name = "IO Pi Plus Joystick"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::hardware::iopi::{MAX_ADDRESS, MIN_ADDRESS};
use crate::input::{Player, Polarity};
use crate::shutdown::POWER_OFF_COMMAND;

const CONFIG_DIR: &str = ".config/iopi-joystick";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Jumper address of the player 1 expander
    pub bus_1_address: u8,
    /// Jumper address of the player 2 expander
    pub bus_2_address: u8,
    pub poll_interval_ms: u64,
    /// Verbose logging and a harmless power button
    pub debug: bool,
    /// Raw pin value a press produces; 1 inverts both ports
    pub button_press_raw_value: u8,
    pub shutdown_command: Vec<String>,
    /// Name of the virtual gamepad
    pub device_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bus_1_address: 0x20,
            bus_2_address: 0x21,
            poll_interval_ms: 10,
            debug: false,
            button_press_raw_value: 0,
            shutdown_command: POWER_OFF_COMMAND.iter().map(|s| s.to_string()).collect(),
            device_name: "IO Pi Plus Joystick".to_string(),
        }
    }
}

impl Config {
    /// Loads the explicit path, else the user config file if present, else defaults
    ///
    /// Runs before logging is set up, so it logs nothing itself. The second
    /// value is the file the config came from, `None` for plain defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let source = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(default_path()).filter(|path| path.is_file()),
        };
        let config = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok((config, source))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, address) in [
            ("bus_1_address", self.bus_1_address),
            ("bus_2_address", self.bus_2_address),
        ] {
            if !(MIN_ADDRESS..=MAX_ADDRESS).contains(&address) {
                return Err(ConfigError::Invalid(format!(
                    "{} {:#04x} outside {:#04x}..={:#04x}",
                    name, address, MIN_ADDRESS, MAX_ADDRESS
                )));
            }
        }
        if self.bus_1_address == self.bus_2_address {
            return Err(ConfigError::Invalid(format!(
                "both buses use address {:#04x}",
                self.bus_1_address
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_ms must be greater than 0".into(),
            ));
        }
        if self.button_press_raw_value > 1 {
            return Err(ConfigError::Invalid(format!(
                "button_press_raw_value must be 0 or 1, got {}",
                self.button_press_raw_value
            )));
        }
        if self.shutdown_command.is_empty() {
            return Err(ConfigError::Invalid("shutdown_command is empty".into()));
        }
        Ok(())
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_raw_press_value(self.button_press_raw_value)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn bus_address(&self, player: Player) -> u8 {
        match player {
            Player::One => self.bus_1_address,
            Player::Two => self.bus_2_address,
        }
    }
}

/// `$HOME/.config/iopi-joystick/config.toml`
pub fn default_path() -> PathBuf {
    let mut path = get_home_dir();
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}

/// Falls back to the current directory without a home
fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

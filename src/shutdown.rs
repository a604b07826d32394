//! Host shutdown triggered by the power button

use std::process::{Command, Output};
use tracing::{info, warn};

/// Default command used to power the host off
pub const POWER_OFF_COMMAND: [&str; 2] = ["/usr/bin/sudo", "/sbin/poweroff"];

/// Side effect run while the power button is held
///
/// Called once per poll cycle for as long as the button stays pressed. The
/// outcome is never checked by the caller.
pub trait ShutdownHook {
    fn request_shutdown(&mut self);
}

/// Runs an external command that powers the host off
#[derive(Clone, Debug)]
pub struct PowerOff {
    program: String,
    args: Vec<String>,
}

impl PowerOff {
    /// Builds the hook from a command line; `None` when the line is empty
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl Default for PowerOff {
    fn default() -> Self {
        Self {
            program: POWER_OFF_COMMAND[0].to_string(),
            args: POWER_OFF_COMMAND[1..].iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl ShutdownHook for PowerOff {
    fn request_shutdown(&mut self) {
        info!("Running {} {:?}", self.program, self.args);

        match Command::new(&self.program).args(&self.args).output() {
            Ok(output) => match failure_detail(&output) {
                Some(stderr) => warn!(
                    "{} exited with {}: {}",
                    self.program, output.status, stderr
                ),
                None => info!("{} exited with {}", self.program, output.status),
            },
            Err(e) => warn!("Failed to run {}: {}", self.program, e),
        }
    }
}

/// Trimmed stderr of a command that did not succeed
fn failure_detail(output: &Output) -> Option<String> {
    if output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stderr).trim().to_string())
}

/// Debug stand-in that only reports the press
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugShutdown;

impl ShutdownHook for DebugShutdown {
    fn request_shutdown(&mut self) {
        info!("POWER button pressed!");
    }
}

use std::convert::Infallible;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::profile::{InputProfile, Ready};
use crate::error::JoystickError;
use crate::output::{Channel, EventSink, JOYSTICK_NEUTRAL_VALUE};

/// Default time between two passes over the buttons
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

const STATS_WINDOW: Duration = Duration::from_secs(10);

/// Drives a profile at a fixed cadence
///
/// Strictly periodic: tick, sleep, repeat. Tick duration is not compensated.
#[derive(Clone, Debug)]
pub struct PollLoop {
    interval: Duration,
}

impl Default for PollLoop {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl PollLoop {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Puts both axes back to neutral as one update
    pub fn center(&self, sink: &mut dyn EventSink) -> Result<(), JoystickError> {
        sink.send(Channel::AbsX, JOYSTICK_NEUTRAL_VALUE)?;
        sink.send(Channel::AbsY, JOYSTICK_NEUTRAL_VALUE)?;
        sink.flush()?;
        Ok(())
    }

    /// Centers the stick and polls until an error stops the loop
    pub fn run(
        &self,
        profile: &mut InputProfile<Ready>,
        sink: &mut dyn EventSink,
    ) -> Result<Infallible, JoystickError> {
        info!(
            "Starting poll loop for player {} every {:?}",
            profile.player().number(),
            self.interval
        );
        self.center(sink)?;

        let mut cycles: u64 = 0;
        let mut window_start = Instant::now();

        loop {
            if let Err(e) = profile.tick(sink) {
                error!("Poll loop stopped after {} cycles: {}", cycles, e);
                return Err(e);
            }
            cycles += 1;

            if window_start.elapsed() >= STATS_WINDOW {
                debug!(
                    "Poll loop stats: {} cycles in last {} seconds",
                    cycles,
                    STATS_WINDOW.as_secs()
                );
                cycles = 0;
                window_start = Instant::now();
            }

            thread::sleep(self.interval);
        }
    }
}

//! Command-driven Panel State
//!
//! LED mask and report interval, written only by the command parser and
//! read by the LED controller and reporter. Mutation goes through
//! [`CommandState::apply`] so a command updates both fields or neither.

use crate::protocol::Command;
use crate::types::{LedMask, ReportInterval};

/// State owned by the command parser
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CommandState {
    leds: LedMask,
    interval: ReportInterval,
}

impl CommandState {
    /// Power-up state: LEDs off, default report interval
    #[must_use]
    pub const fn new() -> Self {
        Self {
            leds: LedMask::OFF,
            interval: ReportInterval::DEFAULT,
        }
    }

    /// Current LED mask
    #[must_use]
    pub const fn leds(&self) -> LedMask {
        self.leds
    }

    /// Current telemetry interval
    #[must_use]
    pub const fn report_interval(&self) -> ReportInterval {
        self.interval
    }

    /// Apply a parsed command
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::Set { leds, .. } => {
                self.leds = *leds;
                self.interval = command.report_interval();
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "State(leds={}, interval={})", self.leds, self.interval);
    }
}

//! Command intake
//!
//! Takes at most one line per tick, parses it and applies it to the
//! [`CommandState`]. Bad lines are counted and dropped; nothing is ever
//! sent back to the host.

use crate::control::state::CommandState;
use crate::protocol::{Command, ParseError};

/// Parses inbound lines and applies accepted commands
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandParser {
    accepted: u32,
    rejected: u32,
    last_error: Option<ParseError>,
}

impl CommandParser {
    /// Create a parser with zeroed counters
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accepted: 0,
            rejected: 0,
            last_error: None,
        }
    }

    /// Parse `line` if there is one and apply it to `state`
    ///
    /// Returns the applied command. No line, a malformed line, or an
    /// unknown keyword all leave `state` untouched.
    pub fn try_parse_and_apply(
        &mut self,
        line: Option<&str>,
        state: &mut CommandState,
    ) -> Option<Command> {
        let line = line?;
        match Command::parse(line) {
            Ok(command) => {
                state.apply(&command);
                self.accepted = self.accepted.wrapping_add(1);
                Some(command)
            }
            Err(err) => {
                self.rejected = self.rejected.wrapping_add(1);
                self.last_error = Some(err);
                None
            }
        }
    }

    /// Number of commands applied
    #[must_use]
    pub const fn accepted(&self) -> u32 {
        self.accepted
    }

    /// Number of lines ignored
    #[must_use]
    pub const fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Reason the most recent rejected line was ignored
    #[must_use]
    pub const fn last_error(&self) -> Option<ParseError> {
        self.last_error
    }
}

//! Capability traits at the hardware boundary
//!
//! ```text
//!   hal adapter ──▶ capability trait ──▶ control (scheduler, components)
//! ```
//!
//! The control layer only sees these traits (plus `embedded-hal`'s
//! `OutputPin` for the LEDs), so the whole loop runs on the host against
//! test doubles. Every method is non-blocking.

use crate::serial::Line;
use crate::types::{AdcReading, ChannelId, Millis, RawSamples};

/// Four-channel 12-bit analog input
pub trait AnalogSource {
    /// Sample one channel
    fn read(&mut self, channel: ChannelId) -> AdcReading;

    /// Sample every channel in telemetry order
    fn read_all(&mut self) -> RawSamples {
        ChannelId::ALL.map(|channel| self.read(channel))
    }
}

/// Line-oriented serial link shared by telemetry and commands
pub trait SerialChannel {
    /// Next complete inbound line, or None if one has not fully arrived
    fn try_read_line(&mut self) -> Option<Line>;

    /// Queue one outbound line; the terminator is added by the channel
    fn write_line(&mut self, line: &str);
}

/// Free-running millisecond clock
pub trait Clock {
    /// Current timestamp
    fn now(&self) -> Millis;
}

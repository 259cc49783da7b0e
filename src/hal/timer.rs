//! Timer Abstractions
//!
//! Millisecond clock backed by the embassy time driver.

use embassy_time::Instant;

use crate::ports::Clock;
use crate::types::Millis;

/// Monotonic clock truncated to a wrapping 32-bit millisecond counter
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create the clock (the time driver is started by `embassy_stm32::init`)
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        // Truncation is the wrap; all comparisons use wrapping subtraction
        Millis::from_ms(Instant::now().as_millis() as u32)
    }
}

//! Telemetry Reporter
//!
//! Writes one `A,...` frame whenever the report interval has elapsed since
//! the previous one. Elapsed time uses wrapping subtraction, so the rate
//! holds across the 32-bit millisecond counter rollover.

use crate::config::TELEMETRY_CHECKSUM;
use crate::dsp::filter::FilteredValues;
use crate::ports::SerialChannel;
use crate::protocol::TelemetryFrame;
use crate::types::{Millis, ReportInterval};

/// Rate-limited telemetry writer
#[derive(Clone, Copy, Debug)]
pub struct Reporter {
    last_send: Millis,
    checksum: bool,
    sent: u32,
}

impl Reporter {
    /// Create a reporter whose first frame goes out one interval after `now`
    #[must_use]
    pub const fn new(now: Millis) -> Self {
        Self::with_checksum(now, TELEMETRY_CHECKSUM)
    }

    /// Create a reporter with an explicit checksum setting
    #[must_use]
    pub const fn with_checksum(now: Millis, checksum: bool) -> Self {
        Self {
            last_send: now,
            checksum,
            sent: 0,
        }
    }

    /// Send a frame if `interval` has passed since the last one
    ///
    /// At most one frame per call. Returns the frame that was written.
    pub fn maybe_send<S: SerialChannel>(
        &mut self,
        now: Millis,
        interval: ReportInterval,
        filtered: &FilteredValues,
        serial: &mut S,
    ) -> Option<TelemetryFrame> {
        if !now.has_elapsed(self.last_send, interval.as_ms()) {
            return None;
        }

        self.last_send = now;
        let frame = TelemetryFrame::from_filtered(filtered);
        serial.write_line(&frame.render(self.checksum));
        self.sent = self.sent.wrapping_add(1);
        Some(frame)
    }

    /// Time of the last frame (or construction)
    #[must_use]
    pub const fn last_send(&self) -> Millis {
        self.last_send
    }

    /// Number of frames written
    #[must_use]
    pub const fn sent(&self) -> u32 {
        self.sent
    }
}

//! Shared types used across the pot panel firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::{
    ADC_MAX, DEFAULT_REPORT_INTERVAL_MS, MIN_REPORT_HZ, MS_PER_SECOND, NUM_CHANNELS,
};

/// ADC reading result
///
/// Always within the 12-bit range; larger raw values are clamped on
/// construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AdcReading {
    /// Raw 12-bit ADC value (0-4095)
    raw: u16,
}

impl AdcReading {
    /// Full-scale reading
    pub const MAX: Self = Self { raw: ADC_MAX };

    /// Create a new ADC reading from raw value
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        let raw = if raw > ADC_MAX { ADC_MAX } else { raw };
        Self { raw }
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Get the reading as a filter input
    #[must_use]
    pub fn as_f32(self) -> f32 {
        f32::from(self.raw)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AdcReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.raw);
    }
}

/// Potentiometer channel, listed in telemetry order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// Section 1 on-time
    Section1On,
    /// Section 1 off-time
    Section1Off,
    /// Section 2 on-time
    Section2On,
    /// Section 2 off-time
    Section2Off,
}

impl ChannelId {
    /// All channels in the order they appear in a telemetry frame
    pub const ALL: [Self; NUM_CHANNELS] = [
        Self::Section1On,
        Self::Section1Off,
        Self::Section2On,
        Self::Section2Off,
    ];

    /// Position of this channel in sample and telemetry arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Section1On => 0,
            Self::Section1Off => 1,
            Self::Section2On => 2,
            Self::Section2Off => 3,
        }
    }

    /// Short human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Section1On => "S1 on",
            Self::Section1Off => "S1 off",
            Self::Section2On => "S2 on",
            Self::Section2Off => "S2 off",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ChannelId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.label());
    }
}

/// One raw reading per channel, in [`ChannelId::ALL`] order
pub type RawSamples = [AdcReading; NUM_CHANNELS];

/// Millisecond timestamp from a free-running 32-bit counter
///
/// The counter wraps after ~49.7 days, so timestamps are deliberately not
/// `Ord`: only the elapsed time between two of them is meaningful.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Millis(u32);

impl Millis {
    /// Counter origin
    pub const ZERO: Self = Self(0);

    /// Create a timestamp from a raw millisecond count
    #[must_use]
    pub const fn from_ms(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the raw millisecond count
    #[must_use]
    pub const fn as_ms(self) -> u32 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, correct across counter wrap
    #[must_use]
    pub const fn elapsed_since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Check whether at least `period_ms` have passed since `earlier`
    #[must_use]
    pub const fn has_elapsed(self, earlier: Self, period_ms: u32) -> bool {
        self.elapsed_since(earlier) >= period_ms
    }

    /// Advance the timestamp, wrapping like the hardware counter
    #[must_use]
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }
}

impl fmt::Debug for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Millis({} ms)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Millis {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ms", self.0);
    }
}

/// Individual indicator bits of the LED mask
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Led {
    /// Section 2 "off" LED (bit 0)
    Sec2Off,
    /// Section 2 "on" LED (bit 1)
    Sec2On,
    /// Section 1 "off" LED (bit 2)
    Sec1Off,
    /// Section 1 "on" LED (bit 3)
    Sec1On,
    /// Power LED steady on, ignored while blinking (bit 4)
    PowerSteady,
    /// Power LED blink enable (bit 5)
    PowerBlink,
}

impl Led {
    /// Bit position inside the mask
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::Sec2Off => 0,
            Self::Sec2On => 1,
            Self::Sec1Off => 2,
            Self::Sec1On => 3,
            Self::PowerSteady => 4,
            Self::PowerBlink => 5,
        }
    }

    /// Single-bit mask value
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

/// LED command bitmask as received over the serial link
///
/// Bits 6 and 7 are carried but unused.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LedMask(u8);

impl LedMask {
    /// Everything off
    pub const OFF: Self = Self(0);

    /// Create a mask from raw bits
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Get the raw bits
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether an LED bit is set
    #[must_use]
    pub const fn is_set(self, led: Led) -> bool {
        self.0 & led.mask() != 0
    }

    /// Return a copy with an LED bit set
    #[must_use]
    pub const fn with(self, led: Led) -> Self {
        Self(self.0 | led.mask())
    }

    /// Return a copy with an LED bit cleared
    #[must_use]
    pub const fn without(self, led: Led) -> Self {
        Self(self.0 & !led.mask())
    }

    /// Whether the power LED should run its blink cycle
    #[must_use]
    pub const fn blink_enabled(self) -> bool {
        self.is_set(Led::PowerBlink)
    }
}

impl fmt::Debug for LedMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedMask({:#010b})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedMask {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "LedMask({=u8:#b})", self.0);
    }
}

/// Telemetry period in milliseconds, never zero
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportInterval(u32);

impl ReportInterval {
    /// Interval in effect at power-up
    pub const DEFAULT: Self = Self(DEFAULT_REPORT_INTERVAL_MS);

    /// Create an interval from milliseconds, returns None for zero
    #[must_use]
    pub const fn from_ms(ms: u32) -> Option<Self> {
        if ms == 0 {
            None
        } else {
            Some(Self(ms))
        }
    }

    /// Convert a requested report rate into an interval
    ///
    /// Rates below 1 Hz are raised to 1 Hz. Rates above 1 kHz would
    /// truncate to 0 ms and are floored at 1 ms instead.
    #[must_use]
    pub const fn from_hz(hz: i32) -> Self {
        let hz = if hz < MIN_REPORT_HZ { MIN_REPORT_HZ } else { hz };
        let ms = MS_PER_SECOND / hz.unsigned_abs();
        if ms == 0 {
            Self(1)
        } else {
            Self(ms)
        }
    }

    /// Get the interval in milliseconds
    #[must_use]
    pub const fn as_ms(self) -> u32 {
        self.0
    }
}

impl Default for ReportInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for ReportInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReportInterval({} ms)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ReportInterval {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} ms", self.0);
    }
}

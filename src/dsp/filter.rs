//! Potentiometer Smoothing Filters
//!
//! Exponential moving average (single-pole IIR lowpass) applied to every
//! ADC channel once per scheduler tick. This module is testable on the host.
//!
//! # Theory of Operation
//!
//! Each channel keeps one estimate `y` and folds in the new raw sample `x`:
//!
//! ```text
//! y[n] = α·x[n] + (1 - α)·y[n-1]
//! ```
//!
//! With α = 0.1 the step response reaches ~63% after 10 ticks. The update
//! is evaluated as `y + α·(x - y)`, which is the same expression but never
//! rounds past `x`, so the estimate stays inside the hull of the inputs.

use crate::config::{FILTER_ALPHA, NUM_CHANNELS};
use crate::types::{AdcReading, ChannelId, RawSamples};

/// EMA smoothing factor, strictly between 0 and 1
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Alpha(f32);

impl Alpha {
    /// Compile-time default from [`FILTER_ALPHA`]
    pub const DEFAULT: Self = Self(FILTER_ALPHA);

    /// Create a smoothing factor, returns None outside the open interval (0, 1)
    #[must_use]
    pub fn new(alpha: f32) -> Option<Self> {
        if alpha > 0.0 && alpha < 1.0 {
            Some(Self(alpha))
        } else {
            None
        }
    }

    /// Get the raw factor
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }

    /// Approximate number of samples to reach 63% of a step
    #[must_use]
    pub fn time_constant_samples(self) -> f32 {
        1.0 / self.0
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Single-channel exponential moving average
#[derive(Clone, Copy, Debug)]
pub struct Ema {
    alpha: f32,
    value: f32,
}

impl Ema {
    /// Create a filter whose estimate starts at `initial`
    ///
    /// Seeding with the first real sample avoids a ramp up from zero.
    #[must_use]
    pub const fn seeded(alpha: Alpha, initial: f32) -> Self {
        Self {
            alpha: alpha.get(),
            value: initial,
        }
    }

    /// Process a single sample, returns the new estimate
    pub fn process(&mut self, input: f32) -> f32 {
        self.value += self.alpha * (input - self.value);
        self.value
    }

    /// Current estimate
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }
}

/// Smoothed estimate for each channel, in [`ChannelId::ALL`] order
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FilteredValues([f32; NUM_CHANNELS]);

impl FilteredValues {
    /// Wrap raw per-channel estimates
    #[must_use]
    pub const fn new(values: [f32; NUM_CHANNELS]) -> Self {
        Self(values)
    }

    /// Estimate for one channel
    #[must_use]
    pub const fn get(&self, channel: ChannelId) -> f32 {
        self.0[channel.index()]
    }

    /// All estimates
    #[must_use]
    pub const fn as_array(&self) -> &[f32; NUM_CHANNELS] {
        &self.0
    }
}

/// Filter bank holding one [`Ema`] per potentiometer
#[derive(Clone, Debug)]
pub struct SignalFilter {
    channels: [Ema; NUM_CHANNELS],
}

impl SignalFilter {
    /// Create the bank seeded from the first set of readings
    #[must_use]
    pub fn seeded(alpha: Alpha, first: &RawSamples) -> Self {
        Self {
            channels: first.map(|reading| Ema::seeded(alpha, reading.as_f32())),
        }
    }

    /// Fold one reading per channel into the estimates
    pub fn update(&mut self, raw: &RawSamples) -> FilteredValues {
        for (ema, reading) in self.channels.iter_mut().zip(raw.iter()) {
            ema.process(reading.as_f32());
        }
        self.values()
    }

    /// Current estimates without updating
    #[must_use]
    pub fn values(&self) -> FilteredValues {
        FilteredValues(self.channels.map(|ema| ema.value()))
    }
}

impl Default for SignalFilter {
    fn default() -> Self {
        Self::seeded(Alpha::DEFAULT, &[AdcReading::default(); NUM_CHANNELS])
    }
}

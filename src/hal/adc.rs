//! ADC Driver
//!
//! Blocking single conversions on ADC1 for the four potentiometers.
//! A conversion takes a few microseconds, well below a scheduler tick.

use embassy_stm32::adc::{Adc, AnyAdcChannel, Resolution, SampleTime};
use embassy_stm32::peripherals::ADC1;

use crate::config::NUM_CHANNELS;
use crate::ports::AnalogSource;
use crate::types::{AdcReading, ChannelId};

/// Potentiometer ADC, one degraded channel per [`ChannelId`]
pub struct PotAdc<'d> {
    adc: Adc<'d, ADC1>,
    channels: [AnyAdcChannel<ADC1>; NUM_CHANNELS],
}

impl PotAdc<'_> {
    /// Create the driver; `channels` must be in [`ChannelId::ALL`] order
    #[must_use]
    pub fn new(adc: ADC1, channels: [AnyAdcChannel<ADC1>; NUM_CHANNELS]) -> Self {
        let adc = Adc::new(adc);
        Self { adc, channels }
    }

    /// Configure 12-bit conversions with a long sample time
    ///
    /// The pots are high-impedance dividers, so the sampling capacitor
    /// needs the slowest setting to settle.
    pub fn configure(&mut self) {
        self.adc.set_resolution(Resolution::BITS12);
        self.adc.set_sample_time(SampleTime::CYCLES247_5);
    }
}

impl AnalogSource for PotAdc<'_> {
    fn read(&mut self, channel: ChannelId) -> AdcReading {
        let raw = self.adc.blocking_read(&mut self.channels[channel.index()]);
        AdcReading::from_raw(raw)
    }
}

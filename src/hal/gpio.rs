//! GPIO Abstractions
//!
//! Push-pull outputs for the panel LEDs, all starting low.

use embassy_stm32::gpio::{Level, Output, Pin, Speed};
use embassy_stm32::Peripheral;

use crate::control::leds::LedBank;

/// Configure one LED pin as a low-speed output, initially off
#[must_use]
pub fn led_output<'d>(pin: impl Peripheral<P = impl Pin> + 'd) -> Output<'d> {
    Output::new(pin, Level::Low, Speed::Low)
}

/// Panel LED pins as wired (see `config::pins`)
pub struct LedPins<'d> {
    /// PB6
    pub sec2_off: Output<'d>,
    /// PB7
    pub sec2_on: Output<'d>,
    /// PB8
    pub sec1_off: Output<'d>,
    /// PB9
    pub sec1_on: Output<'d>,
    /// PB5
    pub power: Output<'d>,
}

impl<'d> LedPins<'d> {
    /// Hand the pins to the LED controller
    #[must_use]
    pub fn into_bank(self) -> LedBank<Output<'d>> {
        LedBank {
            sec2_off: self.sec2_off,
            sec2_on: self.sec2_on,
            sec1_off: self.sec1_off,
            sec1_on: self.sec1_on,
            power: self.power,
        }
    }
}

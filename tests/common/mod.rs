//! Host-side hardware doubles shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use potpanel_firmware::control::leds::LedBank;
use potpanel_firmware::ports::{AnalogSource, Clock, SerialChannel};
use potpanel_firmware::serial::Line;
use potpanel_firmware::types::{AdcReading, ChannelId, Millis};

/// ADC returning whatever the test last set per channel
#[derive(Debug, Default)]
pub struct ScriptedAdc {
    values: [u16; 4],
    pub reads: usize,
}

impl ScriptedAdc {
    pub fn new(values: [u16; 4]) -> Self {
        Self { values, reads: 0 }
    }

    pub fn set(&mut self, channel: ChannelId, raw: u16) {
        self.values[channel.index()] = raw;
    }

    pub fn set_all(&mut self, values: [u16; 4]) {
        self.values = values;
    }
}

impl AnalogSource for ScriptedAdc {
    fn read(&mut self, channel: ChannelId) -> AdcReading {
        self.reads += 1;
        AdcReading::from_raw(self.values[channel.index()])
    }
}

/// Serial channel backed by in-memory queues
#[derive(Debug, Default)]
pub struct MemorySerial {
    inbound: VecDeque<String>,
    pub written: Vec<String>,
}

impl MemorySerial {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        self.inbound.push_back(line.to_string());
    }

    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    pub fn take_written(&mut self) -> Vec<String> {
        std::mem::take(&mut self.written)
    }
}

impl SerialChannel for MemorySerial {
    fn try_read_line(&mut self) -> Option<Line> {
        let line = self.inbound.pop_front()?;
        Line::try_from(line.as_str()).ok()
    }

    fn write_line(&mut self, line: &str) {
        self.written.push(line.to_string());
    }
}

/// Output pin that remembers its level and how often it was written
#[derive(Debug, Default)]
pub struct RecordingPin {
    high: bool,
    pub writes: usize,
}

impl RecordingPin {
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Fresh bank of recording pins
pub fn led_bank() -> LedBank<RecordingPin> {
    LedBank {
        sec2_off: RecordingPin::default(),
        sec2_on: RecordingPin::default(),
        sec1_off: RecordingPin::default(),
        sec1_on: RecordingPin::default(),
        power: RecordingPin::default(),
    }
}

/// Section LED levels as `[sec2_off, sec2_on, sec1_off, sec1_on]`
pub fn section_levels(bank: &LedBank<RecordingPin>) -> [bool; 4] {
    [
        bank.sec2_off.is_high(),
        bank.sec2_on.is_high(),
        bank.sec1_off.is_high(),
        bank.sec1_on.is_high(),
    ]
}

/// Clock the test advances by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn starting_at(ms: u32) -> Self {
        Self { now: Cell::new(ms) }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis::from_ms(self.now.get())
    }
}

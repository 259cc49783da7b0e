//! Serial Link Framing
//!
//! Byte-to-line assembly for the command channel and the line coding the
//! UART is configured with. Host-testable; the UART adapter in `hal`
//! feeds received bytes through [`LineReader`].

use heapless::{String, Vec};

use crate::config::{LINE_BUFFER_SIZE, SERIAL_BAUD_RATE};

/// One received line, terminator stripped
pub type Line = String<LINE_BUFFER_SIZE>;

/// Terminator appended to every transmitted line
pub const LINE_TERMINATOR: &str = "\r\n";

/// Incremental line assembler
///
/// Lines end at `\n` or `\r`, so `\r\n` produces one line and an ignored
/// empty one. A line longer than [`LINE_BUFFER_SIZE`] is dropped along
/// with everything up to its terminator, so a truncated command is never
/// acted on. Lines that are not valid UTF-8 are dropped too.
#[derive(Clone, Debug, Default)]
pub struct LineReader {
    buffer: Vec<u8, LINE_BUFFER_SIZE>,
    discarding: bool,
}

impl LineReader {
    /// Create an empty reader
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Feed one byte, returns a line once its terminator arrives
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == b'\n' || byte == b'\r' {
            if self.discarding {
                self.discarding = false;
                self.buffer.clear();
                return None;
            }
            if self.buffer.is_empty() {
                return None;
            }
            let bytes = core::mem::take(&mut self.buffer);
            return String::from_utf8(bytes).ok();
        }

        if self.discarding {
            return None;
        }

        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            self.discarding = true;
        }
        None
    }

    /// Feed bytes until the first complete line
    ///
    /// Returns the line and how many bytes were consumed; bytes after the
    /// terminator are left for the next call.
    pub fn feed_slice(&mut self, data: &[u8]) -> (Option<Line>, usize) {
        for (i, &byte) in data.iter().enumerate() {
            if let Some(line) = self.feed(byte) {
                return (Some(line), i + 1);
            }
        }
        (None, data.len())
    }

    /// Bytes of the current partial line
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Whether an overlong line is being skipped
    #[must_use]
    pub const fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Drop any partial line
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }
}

/// Line coding (baud rate, etc.)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineCoding {
    /// Baud rate
    pub baud_rate: u32,
    /// Data bits (7, 8, 9)
    pub data_bits: u8,
    /// Stop bits
    pub stop_bits: StopBits,
    /// Parity
    pub parity: Parity,
}

impl Default for LineCoding {
    fn default() -> Self {
        Self {
            baud_rate: SERIAL_BAUD_RATE,
            data_bits: 8,
            stop_bits: StopBits::One,
            parity: Parity::None,
        }
    }
}

/// Stop bits configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopBits {
    /// One stop bit
    #[default]
    One,
    /// Two stop bits
    Two,
}

/// Parity configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parity {
    /// No parity
    #[default]
    None,
    /// Odd parity
    Odd,
    /// Even parity
    Even,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LineCoding {
    fn format(&self, f: defmt::Formatter) {
        let parity = match self.parity {
            Parity::None => 'N',
            Parity::Odd => 'O',
            Parity::Even => 'E',
        };
        let stop = match self.stop_bits {
            StopBits::One => 1u8,
            StopBits::Two => 2u8,
        };
        defmt::write!(f, "{} {}{}{}", self.baud_rate, self.data_bits, parity, stop);
    }
}

//! Communication Protocols
//!
//! Line-oriented ASCII protocol spoken over the serial link.
//!
//! Inbound (host to panel):
//!
//! ```text
//! SET,<led_byte>,<hz>
//! ```
//!
//! Outbound telemetry (panel to host), one frame per report interval:
//!
//! ```text
//! A,<s1_on>,<s1_off>,<s2_on>,<s2_off>[*HH]
//! ```
//!
//! Every telemetry field is exactly four zero-padded digits. The optional
//! `*HH` suffix is the XOR of every byte before the `*`, in upper-case hex.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::{LINE_BUFFER_SIZE, NUM_CHANNELS, TELEMETRY_LINE_SIZE};
use crate::dsp::filter::FilteredValues;
use crate::types::{LedMask, ReportInterval};

/// Command keyword including its field separator
pub const SET_PREFIX: &str = "SET,";

/// Telemetry frame marker including its field separator
pub const TELEMETRY_PREFIX: &str = "A,";

/// Largest value a four-digit telemetry field can carry
pub const MAX_FIELD_VALUE: u16 = 9999;

/// Integer parse that never fails
///
/// Skips leading whitespace, accepts one optional sign, then consumes
/// decimal digits up to the first non-digit. No digits yields 0. Values
/// beyond the `i32` range saturate.
#[must_use]
pub fn parse_int_or_zero(field: &str) -> i32 {
    let mut bytes = field.trim_start().bytes().peekable();

    let negative = match bytes.peek() {
        Some(b'-') => {
            bytes.next();
            true
        }
        Some(b'+') => {
            bytes.next();
            false
        }
        _ => false,
    };

    let mut magnitude: i64 = 0;
    for byte in bytes {
        if !byte.is_ascii_digit() {
            break;
        }
        magnitude = (magnitude * 10 + i64::from(byte - b'0')).min(i64::from(u32::MAX));
    }

    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Why a command line was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Line was blank after trimming
    Empty,
    /// Line does not start with a known keyword
    UnknownCommand,
    /// Keyword present but the frequency field separator is missing
    MissingField,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty line"),
            Self::UnknownCommand => f.write_str("unknown command"),
            Self::MissingField => f.write_str("missing field"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ParseError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Empty => defmt::write!(f, "Empty"),
            Self::UnknownCommand => defmt::write!(f, "UnknownCommand"),
            Self::MissingField => defmt::write!(f, "MissingField"),
        }
    }
}

/// Command parsed from a serial line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the LED mask and the telemetry rate
    Set {
        /// New LED bitmask
        leds: LedMask,
        /// Requested report rate in Hz, as sent (may be zero or negative)
        hz: i32,
    },
}

impl Command {
    /// Parse one line
    ///
    /// The line is trimmed first. For `SET`, the LED field runs from the
    /// first to the second comma and the rate field is everything after the
    /// second comma. Numeric fields use [`parse_int_or_zero`]; the LED value
    /// is wrapped to 8 bits.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseError::Empty);
        }

        let fields = line
            .strip_prefix(SET_PREFIX)
            .ok_or(ParseError::UnknownCommand)?;
        let (led_field, hz_field) = fields.split_once(',').ok_or(ParseError::MissingField)?;

        // Wrap, not saturate: 256 -> 0, -1 -> 255
        let leds = LedMask::from_bits(parse_int_or_zero(led_field) as u8);
        let hz = parse_int_or_zero(hz_field);

        Ok(Self::Set { leds, hz })
    }

    /// Report interval this command selects
    #[must_use]
    pub const fn report_interval(&self) -> ReportInterval {
        match self {
            Self::Set { hz, .. } => ReportInterval::from_hz(*hz),
        }
    }

    /// Render the command as the host sends it (without line terminator)
    #[must_use]
    pub fn encode(&self) -> String<LINE_BUFFER_SIZE> {
        let mut line = String::new();
        match self {
            Self::Set { leds, hz } => {
                // 4 + 3 + 1 + 11 bytes always fits
                let _ = write!(line, "{SET_PREFIX}{},{hz}", leds.bits());
            }
        }
        line
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Set { leds, hz } => defmt::write!(f, "SET({}, {} Hz)", leds, hz),
        }
    }
}

/// Why a telemetry line could not be decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Line does not start with `A,`
    MissingPrefix,
    /// Wrong number of value fields
    FieldCount,
    /// A value field is not a number or exceeds four digits
    InvalidField,
    /// Checksum suffix is not two hex digits
    MalformedChecksum,
    /// Checksum suffix does not match the frame body
    ChecksumMismatch,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPrefix => f.write_str("missing frame prefix"),
            Self::FieldCount => f.write_str("wrong field count"),
            Self::InvalidField => f.write_str("invalid field"),
            Self::MalformedChecksum => f.write_str("malformed checksum"),
            Self::ChecksumMismatch => f.write_str("checksum mismatch"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::MissingPrefix => defmt::write!(f, "MissingPrefix"),
            Self::FieldCount => defmt::write!(f, "FieldCount"),
            Self::InvalidField => defmt::write!(f, "InvalidField"),
            Self::MalformedChecksum => defmt::write!(f, "MalformedChecksum"),
            Self::ChecksumMismatch => defmt::write!(f, "ChecksumMismatch"),
        }
    }
}

/// XOR of every byte in `body`
#[must_use]
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, byte| acc ^ byte)
}

/// Convert a filtered estimate into a four-digit field
///
/// Truncates toward zero; anything below 0, above 9999, or NaN saturates
/// so the frame keeps its fixed width.
#[must_use]
pub fn field_value(estimate: f32) -> u16 {
    if estimate.is_nan() {
        return 0;
    }
    estimate.clamp(0.0, f32::from(MAX_FIELD_VALUE)) as u16
}

/// One telemetry sample set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TelemetryFrame {
    values: [u16; NUM_CHANNELS],
}

impl TelemetryFrame {
    /// Create a frame from field values (saturated to four digits)
    #[must_use]
    pub fn new(values: [u16; NUM_CHANNELS]) -> Self {
        Self {
            values: values.map(|v| v.min(MAX_FIELD_VALUE)),
        }
    }

    /// Create a frame from the filter estimates
    #[must_use]
    pub fn from_filtered(filtered: &FilteredValues) -> Self {
        Self {
            values: filtered.as_array().map(field_value),
        }
    }

    /// Field values in channel order
    #[must_use]
    pub const fn values(&self) -> [u16; NUM_CHANNELS] {
        self.values
    }

    /// Render the frame (without line terminator)
    #[must_use]
    pub fn render(&self, with_checksum: bool) -> String<TELEMETRY_LINE_SIZE> {
        let [a, b, c, d] = self.values;
        let mut line = String::new();
        // 21 bytes of body plus 3 of checksum always fit
        let _ = write!(line, "{TELEMETRY_PREFIX}{a:04},{b:04},{c:04},{d:04}");
        if with_checksum {
            let sum = checksum(&line);
            let _ = write!(line, "*{sum:02X}");
        }
        line
    }

    /// Decode a frame, verifying the checksum when one is present
    pub fn parse(line: &str) -> Result<Self, FrameError> {
        let line = line.trim();
        let (body, suffix) = match line.split_once('*') {
            Some((body, suffix)) => (body, Some(suffix)),
            None => (line, None),
        };

        if let Some(suffix) = suffix {
            if suffix.len() != 2 {
                return Err(FrameError::MalformedChecksum);
            }
            let expected =
                u8::from_str_radix(suffix, 16).map_err(|_| FrameError::MalformedChecksum)?;
            if expected != checksum(body) {
                return Err(FrameError::ChecksumMismatch);
            }
        }

        let fields = body
            .strip_prefix(TELEMETRY_PREFIX)
            .ok_or(FrameError::MissingPrefix)?;

        let mut values = [0u16; NUM_CHANNELS];
        let mut count = 0;
        for field in fields.split(',') {
            let slot = values.get_mut(count).ok_or(FrameError::FieldCount)?;
            if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FrameError::InvalidField);
            }
            let value: u16 = field.parse().map_err(|_| FrameError::InvalidField)?;
            if value > MAX_FIELD_VALUE {
                return Err(FrameError::InvalidField);
            }
            *slot = value;
            count += 1;
        }

        if count != NUM_CHANNELS {
            return Err(FrameError::FieldCount);
        }

        Ok(Self { values })
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TelemetryFrame {
    fn format(&self, f: defmt::Formatter) {
        let [a, b, c, d] = self.values;
        defmt::write!(f, "A({}, {}, {}, {})", a, b, c, d);
    }
}

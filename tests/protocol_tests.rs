//! Protocol Tests
//!
//! Tests for the `SET` command parser and the telemetry frame codec.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test protocol_tests

use potpanel_firmware::control::commands::CommandParser;
use potpanel_firmware::control::state::CommandState;
use potpanel_firmware::dsp::filter::FilteredValues;
use potpanel_firmware::protocol::*;
use potpanel_firmware::types::{Led, LedMask, ReportInterval};

fn set(leds: u8, hz: i32) -> Command {
    Command::Set {
        leds: LedMask::from_bits(leds),
        hz,
    }
}

/// Feed one line through a fresh parser and return the resulting state
fn apply_line(line: &str) -> (CommandState, Option<Command>) {
    let mut parser = CommandParser::new();
    let mut state = CommandState::new();
    let applied = parser.try_parse_and_apply(Some(line), &mut state);
    (state, applied)
}

// =============================================================================
// SET Parsing Tests
// =============================================================================

#[test]
fn parse_full_command() {
    assert_eq!(Command::parse("SET,255,10"), Ok(set(255, 10)));
}

#[test]
fn parse_trims_whitespace() {
    assert_eq!(Command::parse("  SET,3,5 \r\n"), Ok(set(3, 5)));
}

#[test]
fn parse_non_numeric_fields_become_zero() {
    assert_eq!(Command::parse("SET,abc,5"), Ok(set(0, 5)));
    assert_eq!(Command::parse("SET,7,fast"), Ok(set(7, 0)));
    assert_eq!(Command::parse("SET,,"), Ok(set(0, 0)));
}

#[test]
fn parse_numeric_prefix() {
    assert_eq!(Command::parse("SET,12xyz,4Hz"), Ok(set(12, 4)));
}

#[test]
fn parse_led_byte_wraps() {
    assert_eq!(Command::parse("SET,256,1"), Ok(set(0, 1)));
    assert_eq!(Command::parse("SET,257,1"), Ok(set(1, 1)));
    assert_eq!(Command::parse("SET,-1,1"), Ok(set(255, 1)));
}

#[test]
fn parse_rate_takes_rest_of_line() {
    // The rate field runs from the second comma to the end
    assert_eq!(Command::parse("SET,1,2,3"), Ok(set(1, 2)));
}

#[test]
fn parse_missing_rate_field() {
    assert_eq!(Command::parse("SET,16"), Err(ParseError::MissingField));
}

#[test]
fn parse_rejects_unknown() {
    assert_eq!(Command::parse("GET,1,2"), Err(ParseError::UnknownCommand));
    assert_eq!(Command::parse("set,1,2"), Err(ParseError::UnknownCommand));
    assert_eq!(Command::parse("A,0000,0000,0000,0000"), Err(ParseError::UnknownCommand));
}

#[test]
fn parse_rejects_empty() {
    assert_eq!(Command::parse(""), Err(ParseError::Empty));
    assert_eq!(Command::parse("   "), Err(ParseError::Empty));
}

#[test]
fn parse_error_display() {
    assert_eq!(ParseError::MissingField.to_string(), "missing field");
    assert_eq!(ParseError::UnknownCommand.to_string(), "unknown command");
}

#[test]
fn command_report_interval() {
    assert_eq!(set(0, 10).report_interval().as_ms(), 100);
    assert_eq!(set(0, 0).report_interval().as_ms(), 1000);
    assert_eq!(set(0, -3).report_interval().as_ms(), 1000);
}

#[test]
fn command_encode() {
    assert_eq!(set(48, 5).encode().as_str(), "SET,48,5");
    assert_eq!(set(0, -1).encode().as_str(), "SET,0,-1");
    assert_eq!(Command::parse(&set(200, 20).encode()), Ok(set(200, 20)));
}

// =============================================================================
// Command Application Tests
// =============================================================================

#[test]
fn apply_sets_leds_and_interval() {
    let (state, applied) = apply_line("SET,255,10");
    assert_eq!(applied, Some(set(255, 10)));
    assert_eq!(state.leds().bits(), 255);
    assert_eq!(state.report_interval().as_ms(), 100);
}

#[test]
fn apply_zero_rate_clamps_to_one_hz() {
    let (state, _) = apply_line("SET,0,0");
    assert_eq!(state.leds(), LedMask::OFF);
    assert_eq!(state.report_interval().as_ms(), 1000);
}

#[test]
fn apply_garbage_led_field() {
    let (state, _) = apply_line("SET,abc,5");
    assert_eq!(state.leds(), LedMask::OFF);
    assert_eq!(state.report_interval().as_ms(), 200);
}

#[test]
fn malformed_line_leaves_state_unchanged() {
    let mut parser = CommandParser::new();
    let mut state = CommandState::new();
    parser.try_parse_and_apply(Some("SET,48,4"), &mut state);
    let before = state;

    assert_eq!(parser.try_parse_and_apply(Some("SET,16"), &mut state), None);
    assert_eq!(state, before);
    assert_eq!(parser.accepted(), 1);
    assert_eq!(parser.rejected(), 1);
    assert_eq!(parser.last_error(), Some(ParseError::MissingField));
}

#[test]
fn no_line_is_not_an_error() {
    let mut parser = CommandParser::new();
    let mut state = CommandState::new();
    assert_eq!(parser.try_parse_and_apply(None, &mut state), None);
    assert_eq!(parser.rejected(), 0);
    assert_eq!(state, CommandState::new());
}

#[test]
fn power_up_state() {
    let state = CommandState::new();
    assert_eq!(state.leds(), LedMask::OFF);
    assert_eq!(state.report_interval(), ReportInterval::DEFAULT);
}

#[test]
fn later_command_replaces_earlier() {
    let mut parser = CommandParser::new();
    let mut state = CommandState::new();
    parser.try_parse_and_apply(Some("SET,32,50"), &mut state);
    parser.try_parse_and_apply(Some("SET,16,2"), &mut state);

    assert!(state.leds().is_set(Led::PowerSteady));
    assert!(!state.leds().is_set(Led::PowerBlink));
    assert_eq!(state.report_interval().as_ms(), 500);
}

// =============================================================================
// Telemetry Frame Tests
// =============================================================================

#[test]
fn frame_zero_pads_fields() {
    let frame = TelemetryFrame::new([0, 4095, 1, 999]);
    assert_eq!(frame.render(false).as_str(), "A,0000,4095,0001,0999");
}

#[test]
fn frame_truncates_estimates() {
    let filtered = FilteredValues::new([0.0, 4095.0, 1.9, 999.99]);
    let frame = TelemetryFrame::from_filtered(&filtered);
    assert_eq!(frame.values(), [0, 4095, 1, 999]);
}

#[test]
fn frame_saturates_out_of_range() {
    let filtered = FilteredValues::new([-5.0, 12345.0, f32::NAN, 9999.5]);
    let frame = TelemetryFrame::from_filtered(&filtered);
    assert_eq!(frame.render(false).as_str(), "A,0000,9999,0000,9999");
}

#[test]
fn frame_new_saturates() {
    assert_eq!(TelemetryFrame::new([10_000, 0, 0, 0]).values()[0], MAX_FIELD_VALUE);
}

#[test]
fn field_value_edges() {
    assert_eq!(field_value(0.0), 0);
    assert_eq!(field_value(0.999), 0);
    assert_eq!(field_value(-0.5), 0);
    assert_eq!(field_value(f32::INFINITY), 9999);
    assert_eq!(field_value(f32::NEG_INFINITY), 0);
}

// =============================================================================
// Checksum Tests
// =============================================================================

#[test]
fn checksum_known_frame() {
    // Commas and zeros cancel in pairs, leaving 'A'
    let frame = TelemetryFrame::new([0, 0, 0, 0]);
    assert_eq!(frame.render(true).as_str(), "A,0000,0000,0000,0000*41");
}

#[test]
fn checksum_is_xor() {
    assert_eq!(checksum("A"), 0x41);
    assert_eq!(checksum("AB"), 0x41 ^ 0x42);
}

#[test]
fn checksum_suffix_is_upper_hex() {
    let line = TelemetryFrame::new([1234, 5678, 9, 4095]).render(true);
    let (body, suffix) = line.split_once('*').unwrap();
    assert_eq!(suffix, format!("{:02X}", checksum(body)));
}

// =============================================================================
// Frame Decoding Tests
// =============================================================================

#[test]
fn parse_frame_without_checksum() {
    let frame = TelemetryFrame::parse("A,0012,0345,4095,0000").unwrap();
    assert_eq!(frame.values(), [12, 345, 4095, 0]);
}

#[test]
fn parse_frame_with_checksum() {
    let frame = TelemetryFrame::new([1, 2, 3, 4]);
    let line = frame.render(true);
    assert_eq!(TelemetryFrame::parse(&line), Ok(frame));
}

#[test]
fn parse_frame_tolerates_terminator() {
    assert!(TelemetryFrame::parse("A,0000,0000,0000,0000*41\r\n").is_ok());
}

#[test]
fn parse_frame_checksum_mismatch() {
    assert_eq!(
        TelemetryFrame::parse("A,0000,0000,0000,0001*41"),
        Err(FrameError::ChecksumMismatch)
    );
}

#[test]
fn parse_frame_malformed_checksum() {
    assert_eq!(
        TelemetryFrame::parse("A,0000,0000,0000,0000*4"),
        Err(FrameError::MalformedChecksum)
    );
    assert_eq!(
        TelemetryFrame::parse("A,0000,0000,0000,0000*ZZ"),
        Err(FrameError::MalformedChecksum)
    );
}

#[test]
fn parse_frame_structure_errors() {
    assert_eq!(
        TelemetryFrame::parse("B,0000,0000,0000,0000"),
        Err(FrameError::MissingPrefix)
    );
    assert_eq!(
        TelemetryFrame::parse("A,0000,0000,0000"),
        Err(FrameError::FieldCount)
    );
    assert_eq!(
        TelemetryFrame::parse("A,0000,0000,0000,0000,0000"),
        Err(FrameError::FieldCount)
    );
    assert_eq!(
        TelemetryFrame::parse("A,0000,-001,0000,0000"),
        Err(FrameError::InvalidField)
    );
    assert_eq!(
        TelemetryFrame::parse("A,0000,,0000,0000"),
        Err(FrameError::InvalidField)
    );
}

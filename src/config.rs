//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the pot panel hardware.
//! All pin mappings, timing intervals, and filter parameters are centralized here.

/// Number of potentiometer channels sampled every tick
pub const NUM_CHANNELS: usize = 4;

/// ADC resolution in bits
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// Largest raw sample the ADC can produce (12-bit)
pub const ADC_MAX: u16 = (1 << ADC_RESOLUTION_BITS) - 1;

/// EMA smoothing factor (heavy smoothing, ~10-sample time constant)
pub const FILTER_ALPHA: f32 = 0.1;

/// Power LED blink half-period in milliseconds
pub const BLINK_PERIOD_MS: u32 = 250;

/// Telemetry interval used until the first `SET` command arrives
pub const DEFAULT_REPORT_INTERVAL_MS: u32 = 1000;

/// Milliseconds per second, the numerator of the Hz to interval conversion
pub const MS_PER_SECOND: u32 = 1000;

/// Lowest report rate a command can request
pub const MIN_REPORT_HZ: i32 = 1;

/// Serial link baud rate
pub const SERIAL_BAUD_RATE: u32 = 115_200;

/// Longest inbound command line (excluding terminator)
pub const LINE_BUFFER_SIZE: usize = 64;

/// Longest outbound line: `A,dddd,dddd,dddd,dddd*HH`
pub const TELEMETRY_LINE_SIZE: usize = 32;

/// UART receive ring buffer size
pub const UART_RX_BUFFER_SIZE: usize = 128;

/// UART transmit ring buffer size
pub const UART_TX_BUFFER_SIZE: usize = 128;

/// Whether telemetry frames carry a `*HH` checksum suffix
pub const TELEMETRY_CHECKSUM: bool = cfg!(feature = "telemetry-checksum");

/// Interval between status log lines from the main loop
pub const STATUS_LOG_INTERVAL_MS: u32 = 10_000;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the panel wiring

    /// Section 1 on-time potentiometer (ADC1_IN1)
    pub const POT_ON_TIME_1: &str = "PA0";

    /// Section 1 off-time potentiometer (ADC1_IN2)
    pub const POT_OFF_TIME_1: &str = "PA1";

    /// Section 2 on-time potentiometer (ADC1_IN3)
    pub const POT_ON_TIME_2: &str = "PA2";

    /// Section 2 off-time potentiometer (ADC1_IN4)
    pub const POT_OFF_TIME_2: &str = "PA3";

    /// Power LED
    pub const POWER_LED: &str = "PB5";

    /// Section 1 "on" LED
    pub const SEC_1_ON_LED: &str = "PB9";

    /// Section 1 "off" LED
    pub const SEC_1_OFF_LED: &str = "PB8";

    /// Section 2 "on" LED
    pub const SEC_2_ON_LED: &str = "PB7";

    /// Section 2 "off" LED
    pub const SEC_2_OFF_LED: &str = "PB6";

    /// USART1 TX
    pub const SERIAL_TX: &str = "PA9";

    /// USART1 RX
    pub const SERIAL_RX: &str = "PA10";
}

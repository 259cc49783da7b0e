//! Pot Panel Firmware Library
//!
//! This library provides the core functionality for an STM32G474-based
//! potentiometer panel. Four pots set the on/off times of two sections;
//! the panel smooths their readings, streams them to a host over a serial
//! link, and lights its indicator LEDs as the host commands.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │  Scheduler  │  Command Parser  │  LED Control  │  Reporter   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  PROTOCOL / DSP LAYER                        │
//! │  SET / A-frame codec  │  Line framing  │  EMA filter bank    │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PORTS (traits)                           │
//! │  AnalogSource  │  SerialChannel  │  Clock  │  OutputPin      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                         │
//! │  ADC1  │  Buffered USART1  │  GPIO  │  embassy-time          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single thread of control**: one polling loop, no locks, no blocking
//! - **Single writer per field**: shared state lives in explicit structs
//! - **Type-driven design**: custom types enforce invariants at compile time
//! - **No unsafe in application code**: all unsafe isolated in HAL crates
//! - **Functional core, imperative shell**: pure logic separated from I/O

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Implements the capability traits on STM32G474 peripherals.
#[cfg(feature = "embedded")]
pub mod hal;

/// Capability traits between control logic and hardware
pub mod ports;

/// Signal smoothing
pub mod dsp;

/// Panel Control Logic
///
/// Scheduler and the components it runs.
pub mod control;

/// Communication Protocols
///
/// `SET` command parser, telemetry frame codec.
pub mod protocol;

/// Serial line framing
pub mod serial;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::control::leds::{LedBank, LedController, PowerMode};
    pub use crate::control::scheduler::{Scheduler, TickOutcome};
    pub use crate::hal::adc::PotAdc;
    pub use crate::hal::gpio::{led_output, LedPins};
    pub use crate::hal::timer::SystemClock;
    pub use crate::hal::uart::{uart_config, UartLink};
    pub use crate::ports::{AnalogSource, Clock, SerialChannel};
    pub use crate::serial::LineCoding;

    // Common traits
    pub use embedded_hal::digital::OutputPin;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}

//! Hardware Abstraction Layer
//!
//! Implements the [`crate::ports`] capabilities on STM32G474 peripherals.
//! This module isolates hardware-specific code from the control logic.

pub mod adc;
pub mod gpio;
pub mod timer;
pub mod uart;

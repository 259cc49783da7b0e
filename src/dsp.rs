//! Digital Signal Processing
//!
//! Smoothing of the raw potentiometer readings before they are reported.

pub mod filter;

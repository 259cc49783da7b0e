//! Panel Control Logic
//!
//! The components run by the cooperative scheduler and the state they
//! share. Implements the functional core of the panel; hardware comes in
//! through the traits in [`crate::ports`].

pub mod commands;
pub mod leds;
pub mod reporter;
pub mod scheduler;
pub mod state;

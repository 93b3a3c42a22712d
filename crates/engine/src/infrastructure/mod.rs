//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod app_settings;
pub mod clock;
pub mod persistence;
pub mod ports;
pub mod random_number_client;
pub mod resilient_random;
pub mod retry;

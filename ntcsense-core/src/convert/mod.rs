//! Conversions
//!
//! raw ADC code → resistance → temperature. Both stages are pure
//! functions of their input and the configuration: no allocation, no
//! shared state, constant time. Safe to call from interrupt context.

pub mod resistance;
pub mod temperature;

pub use temperature::{celsius_to_kelvin, kelvin_to_celsius, KELVIN_OFFSET};

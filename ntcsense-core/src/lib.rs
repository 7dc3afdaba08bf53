//! Board-agnostic NTC thermistor conversion
//!
//! This crate turns a raw ADC code sampled from a thermistor voltage
//! divider into the thermistor's resistance and temperature:
//!
//! - Configuration types for the circuit and Steinhart-Hart model
//! - Divider strategies (series only, series with a parallel resistor)
//! - Resistance and temperature estimators
//! - The constant set generated from `thermistor.toml` at build time
//! - The temperature sensor trait implemented by drivers
//!
//! Everything here is `no_std`, allocation free, and pure: conversions
//! depend only on their input code and an immutable configuration.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod convert;
pub mod traits;

pub use config::generated::{
    resistance_from_adc, temperature_from_adc, SensorDivider, INFO, RATED_RANGE, SENSOR,
};
pub use config::{
    AdcResolution, ConfigError, Divider, ResistanceClamp, SensorInfo, SeriesOnly, SteinhartHart,
    TemperatureRange, ThermistorConfig, WithParallel,
};
pub use convert::{celsius_to_kelvin, kelvin_to_celsius, KELVIN_OFFSET};

//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in ntcsense-core:
//!
//! - Temperature sensors (NTC thermistor on an ADC voltage divider)

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;

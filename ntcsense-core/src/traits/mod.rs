//! Sensor abstraction traits
//!
//! These traits define the interface between application code and
//! thermistor drivers.

pub mod sensor;

pub use sensor::{SensorError, TemperatureSensor};

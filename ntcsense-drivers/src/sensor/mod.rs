//! Temperature sensor drivers

pub mod thermistor;

pub use thermistor::{AdcReader, FaultWindow, ThermistorSensor};

//! Named constant sets for known sensor/circuit combinations

use super::divider::SeriesOnly;
use super::types::{
    AdcResolution, ResistanceClamp, SensorInfo, SteinhartHart, TemperatureRange, ThermistorConfig,
};

/// Murata NCP18XH103F03RB (10k, B3380, 0603)
pub const NCP18XH103_INFO: SensorInfo = SensorInfo {
    name: "NCP18XH",
    part_number: "NCP18XH103F03RB",
    manufacturer: "Murata",
    nominal_ohms: 10_000.0,
    b_constant: Some(3380.0),
};

/// Fit window of [`NCP18XH103`]
pub const NCP18XH103_RANGE: TemperatureRange = TemperatureRange::new(-40.0, 125.0);

/// NCP18XH103 on a 12-bit, 3.30V ADC behind a 10k series resistor
pub const NCP18XH103: ThermistorConfig<SeriesOnly> = ThermistorConfig::new(
    AdcResolution::new(12),
    3.30,
    10_000.0,
    SteinhartHart::new(8.574782e-4, 2.568106e-4, 1.688598e-7),
    ResistanceClamp::new(1.0e-1, 1.0e9),
);

//! Constant set generated from `thermistor.toml`
//!
//! build.rs validates the file and emits `INFO`, `RATED_RANGE`, the
//! `SensorDivider` alias and `SENSOR`. The free functions below bind the two
//! conversions to that set.

use super::divider::*;
use super::types::*;

include!(concat!(env!("OUT_DIR"), "/thermistor.rs"));

/// Estimated thermistor resistance (Ω) for `code`, using [`SENSOR`]
#[inline]
pub fn resistance_from_adc(code: u32) -> f32 {
    SENSOR.resistance_from_adc(code)
}

/// Estimated temperature (°C) for `code`, using [`SENSOR`]
#[inline]
pub fn temperature_from_adc(code: u32) -> f32 {
    SENSOR.temperature_from_adc(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_set_is_valid() {
        assert_eq!(SENSOR.validate(), Ok(()));
        assert!(!INFO.name.is_empty());
        assert!(RATED_RANGE.lower_celsius < RATED_RANGE.upper_celsius);
    }

    #[test]
    fn test_free_functions_use_generated_set() {
        let max = SENSOR.resolution.max_code();
        for code in [0, 1, max / 2, max - 1, max] {
            assert_eq!(
                resistance_from_adc(code).to_bits(),
                SENSOR.resistance_from_adc(code).to_bits()
            );
            assert_eq!(
                temperature_from_adc(code).to_bits(),
                SENSOR.temperature_from_adc(code).to_bits()
            );
        }
    }

    #[test]
    fn test_boundaries_hit_clamp() {
        let max = SENSOR.resolution.max_code();
        assert_eq!(resistance_from_adc(0), SENSOR.clamp.min_ohms);
        assert_eq!(resistance_from_adc(max), SENSOR.clamp.max_ohms);
    }

    #[test]
    fn test_nominal_resistance_near_25c() {
        let celsius = SENSOR.coefficients.celsius_from_ohms(INFO.nominal_ohms);
        assert!((celsius - 25.0).abs() < 1.0, "got {}", celsius);
    }
}

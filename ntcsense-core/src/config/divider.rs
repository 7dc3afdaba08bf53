//! Divider strategies
//!
//! The divider equation solves for the resistance of the lower leg. When a
//! resistor sits across the thermistor, that leg is the parallel pair and
//! the thermistor's own resistance has to be recovered from it.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{positive_finite, ConfigError};

/// Maps the resistance solved from the divider to the thermistor resistance
pub trait Divider: Copy {
    /// Thermistor resistance given the lower-leg resistance (Ω)
    ///
    /// May return `f32::INFINITY` when the thermistor reads as open; the
    /// caller clamps the result.
    fn thermistor_ohms(&self, leg_ohms: f32) -> f32;

    /// Check strategy parameters
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Thermistor alone in the lower leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeriesOnly;

impl Divider for SeriesOnly {
    #[inline(always)]
    fn thermistor_ohms(&self, leg_ohms: f32) -> f32 {
        leg_ohms
    }
}

/// Thermistor with a fixed resistor across it
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WithParallel {
    /// Parallel resistor (Ω)
    pub r_parallel_ohms: f32,
}

impl WithParallel {
    pub const fn new(r_parallel_ohms: f32) -> Self {
        Self { r_parallel_ohms }
    }
}

impl Divider for WithParallel {
    #[inline]
    fn thermistor_ohms(&self, leg_ohms: f32) -> f32 {
        // 1/R_leg = 1/R_ntc + 1/R_p
        let conductance = 1.0 / leg_ohms - 1.0 / self.r_parallel_ohms;
        if conductance <= 0.0 {
            // Leg at or above R_p: the thermistor carries no current
            return f32::INFINITY;
        }
        1.0 / conductance
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if positive_finite(self.r_parallel_ohms) {
            Ok(())
        } else {
            Err(ConfigError::InvalidParallelResistor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_only_is_identity() {
        assert_eq!(SeriesOnly.thermistor_ohms(10_000.0), 10_000.0);
        assert_eq!(SeriesOnly.thermistor_ohms(0.25), 0.25);
    }

    #[test]
    fn test_parallel_recovers_thermistor() {
        // 100k across 100k reads as 50k
        let divider = WithParallel::new(100_000.0);
        let r = divider.thermistor_ohms(50_000.0);
        assert!((r - 100_000.0).abs() / 100_000.0 < 1e-4);

        // 100k across 25k reads as 20k
        let r = divider.thermistor_ohms(20_000.0);
        assert!((r - 25_000.0).abs() / 25_000.0 < 1e-4);
    }

    #[test]
    fn test_parallel_open_thermistor() {
        let divider = WithParallel::new(100_000.0);
        assert_eq!(divider.thermistor_ohms(100_000.0), f32::INFINITY);
        assert_eq!(divider.thermistor_ohms(250_000.0), f32::INFINITY);
    }

    #[test]
    fn test_parallel_validate() {
        assert_eq!(WithParallel::new(47_000.0).validate(), Ok(()));
        assert_eq!(
            WithParallel::new(0.0).validate(),
            Err(ConfigError::InvalidParallelResistor)
        );
        assert_eq!(SeriesOnly.validate(), Ok(()));
    }
}

//! Temperature estimator
//!
//! Steinhart-Hart: 1/T = A + B·ln(R) + C·ln(R)³, T in kelvin.

use crate::config::{Divider, SteinhartHart, ThermistorConfig};

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f32 = 273.15;

/// Convert °C to K
#[inline]
pub fn celsius_to_kelvin(celsius: f32) -> f32 {
    celsius + KELVIN_OFFSET
}

/// Convert K to °C
#[inline]
pub fn kelvin_to_celsius(kelvin: f32) -> f32 {
    kelvin - KELVIN_OFFSET
}

impl SteinhartHart {
    /// Evaluate the model at `ohms`, returning kelvin
    ///
    /// `ohms` must be positive. Resistances coming from
    /// [`ThermistorConfig::resistance_from_adc`] always are.
    #[inline]
    pub fn kelvin_from_ohms(&self, ohms: f32) -> f32 {
        let ln_r = libm::logf(ohms);
        1.0 / (self.a + self.b * ln_r + self.c * ln_r * ln_r * ln_r)
    }

    /// Evaluate the model at `ohms`, returning °C
    #[inline]
    pub fn celsius_from_ohms(&self, ohms: f32) -> f32 {
        kelvin_to_celsius(self.kelvin_from_ohms(ohms))
    }
}

impl<D: Divider> ThermistorConfig<D> {
    /// Estimate the temperature (K) from a raw ADC code
    #[inline]
    pub fn kelvin_from_adc(&self, code: u32) -> f32 {
        self.coefficients.kelvin_from_ohms(self.resistance_from_adc(code))
    }

    /// Estimate the temperature (°C) from a raw ADC code
    ///
    /// Total over `[0, ADC_MAX]`: the resistance clamp keeps the logarithm
    /// defined at both rails. Same precondition on `code` as
    /// [`resistance_from_adc`](Self::resistance_from_adc).
    #[inline]
    pub fn temperature_from_adc(&self, code: u32) -> f32 {
        kelvin_to_celsius(self.kelvin_from_adc(code))
    }
}

//! Resistance estimator
//!
//! Circuit: VREF -- R_series -- ADC_PIN -- NTC -- GND
//! v = VREF * code / ADC_MAX
//! R_leg = R_series * v / (VREF - v)

use crate::config::{Divider, ThermistorConfig};

impl<D: Divider> ThermistorConfig<D> {
    /// Estimate the thermistor resistance (Ω) from a raw ADC code
    ///
    /// `code` must be within `[0, ADC_MAX]`; mask raw readings with
    /// [`AdcResolution::mask`](crate::AdcResolution::mask) first. This is
    /// checked in debug builds only.
    ///
    /// Code 0 returns the clamp floor and `ADC_MAX` the clamp ceiling, where
    /// the divider equation is singular. The result always lies in
    /// `[clamp.min_ohms, clamp.max_ohms]`.
    #[inline]
    pub fn resistance_from_adc(&self, code: u32) -> f32 {
        let max_code = self.resolution.max_code();
        debug_assert!(
            code <= max_code,
            "ADC code {} exceeds {}-bit range",
            code,
            self.resolution.bits()
        );

        if code == 0 {
            return self.clamp.min_ohms;
        }
        if code == max_code {
            return self.clamp.max_ohms;
        }

        let v = self.vref_volts * code as f32 / max_code as f32;
        let leg_ohms = self.r_series_ohms * v / (self.vref_volts - v);

        self.clamp.apply(self.divider.thermistor_ohms(leg_ohms))
    }
}

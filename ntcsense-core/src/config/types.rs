//! Configuration type definitions
//!
//! A [`ThermistorConfig`] bundles everything a conversion needs. Values are
//! `Copy` and built with `const fn` constructors so several sensor/circuit
//! combinations can live side by side as `const` items.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::divider::{Divider, SeriesOnly, WithParallel};

/// Widest supported ADC, in bits
pub const MAX_RESOLUTION_BITS: u8 = 24;

/// Configuration errors reported by [`ThermistorConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reference voltage is not a positive finite number
    InvalidReference,
    /// ADC bit width outside 1..=24
    InvalidResolution,
    /// Series resistor is not a positive finite number
    InvalidSeriesResistor,
    /// Parallel resistor is not a positive finite number
    InvalidParallelResistor,
    /// Clamp bounds are not `0 < min < max`
    InvalidClamp,
    /// A Steinhart-Hart coefficient is NaN or infinite
    NonFiniteCoefficient,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidReference => "reference voltage must be positive and finite",
            Self::InvalidResolution => "ADC resolution must be 1-24 bits",
            Self::InvalidSeriesResistor => "series resistor must be positive and finite",
            Self::InvalidParallelResistor => "parallel resistor must be positive and finite",
            Self::InvalidClamp => "resistance clamp must satisfy 0 < min < max",
            Self::NonFiniteCoefficient => "Steinhart-Hart coefficients must be finite",
        };
        f.write_str(msg)
    }
}

pub(crate) fn positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// ADC bit width
///
/// Always within `1..=MAX_RESOLUTION_BITS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct AdcResolution {
    bits: u8,
}

impl AdcResolution {
    /// Create a resolution of `bits` bits
    ///
    /// # Panics
    /// If `bits` is outside `1..=24`. In a `const` item this is a compile error.
    pub const fn new(bits: u8) -> Self {
        assert!(
            bits >= 1 && bits <= MAX_RESOLUTION_BITS,
            "ADC resolution must be 1-24 bits"
        );
        Self { bits }
    }

    /// Bit width
    pub const fn bits(self) -> u8 {
        self.bits
    }

    /// Full-scale code, `2^bits - 1`
    pub const fn max_code(self) -> u32 {
        (1u32 << self.bits) - 1
    }

    /// Drop bits above the configured resolution
    ///
    /// Use this on raw hardware readings before converting them.
    pub const fn mask(self, raw: u32) -> u32 {
        raw & self.max_code()
    }
}

impl TryFrom<u8> for AdcResolution {
    type Error = ConfigError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if (1..=MAX_RESOLUTION_BITS).contains(&bits) {
            Ok(Self { bits })
        } else {
            Err(ConfigError::InvalidResolution)
        }
    }
}

impl From<AdcResolution> for u8 {
    fn from(resolution: AdcResolution) -> u8 {
        resolution.bits
    }
}

/// Steinhart-Hart coefficients
///
/// `1/T = A + B·ln(R) + C·ln(R)³`, with `T` in kelvin and `R` in ohms.
/// Fitted offline from the manufacturer's R/T table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SteinhartHart {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SteinhartHart {
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.a.is_finite() && self.b.is_finite() && self.c.is_finite() {
            Ok(())
        } else {
            Err(ConfigError::NonFiniteCoefficient)
        }
    }
}

/// Resistance bounds substituted at the singular ADC codes
///
/// `min_ohms` stands in for a zero reading, `max_ohms` for full scale.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResistanceClamp {
    pub min_ohms: f32,
    pub max_ohms: f32,
}

impl ResistanceClamp {
    pub const fn new(min_ohms: f32, max_ohms: f32) -> Self {
        Self { min_ohms, max_ohms }
    }

    /// Bound `ohms` to `[min_ohms, max_ohms]`
    ///
    /// Infinity maps to `max_ohms`. Never panics, even on a bad clamp.
    #[inline]
    pub fn apply(&self, ohms: f32) -> f32 {
        ohms.max(self.min_ohms).min(self.max_ohms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if positive_finite(self.min_ohms)
            && positive_finite(self.max_ohms)
            && self.min_ohms < self.max_ohms
        {
            Ok(())
        } else {
            Err(ConfigError::InvalidClamp)
        }
    }
}

/// Temperature window a coefficient set is valid over (°C)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemperatureRange {
    pub lower_celsius: f32,
    pub upper_celsius: f32,
}

impl TemperatureRange {
    pub const fn new(lower_celsius: f32, upper_celsius: f32) -> Self {
        Self {
            lower_celsius,
            upper_celsius,
        }
    }

    /// Check whether `celsius` lies inside the window (inclusive)
    pub fn contains(&self, celsius: f32) -> bool {
        celsius >= self.lower_celsius && celsius <= self.upper_celsius
    }
}

/// Thermistor metadata carried over from the R/T table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorInfo {
    /// Short name (e.g., "NCP18XH")
    pub name: &'static str,
    /// Manufacturer part number
    pub part_number: &'static str,
    pub manufacturer: &'static str,
    /// Rated resistance at 25°C
    pub nominal_ohms: f32,
    /// B constant (K), when the datasheet gives one
    pub b_constant: Option<f32>,
}

/// Complete constant set for one sensor on one circuit
///
/// Circuit: VREF -- R_series -- ADC_PIN -- NTC -- GND, optionally with a
/// resistor across the NTC. The divider strategy `D` is a type parameter so
/// the choice is made once, when the configuration is built.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ThermistorConfig<D = SeriesOnly> {
    /// ADC bit width
    pub resolution: AdcResolution,
    /// ADC reference voltage, also the divider supply (V)
    pub vref_volts: f32,
    /// Series resistor between VREF and the ADC pin (Ω)
    pub r_series_ohms: f32,
    /// Model coefficients
    pub coefficients: SteinhartHart,
    /// Bounds for the estimated resistance
    pub clamp: ResistanceClamp,
    /// Divider strategy
    pub divider: D,
}

impl ThermistorConfig<SeriesOnly> {
    /// Create a divider-only configuration
    pub const fn new(
        resolution: AdcResolution,
        vref_volts: f32,
        r_series_ohms: f32,
        coefficients: SteinhartHart,
        clamp: ResistanceClamp,
    ) -> Self {
        Self {
            resolution,
            vref_volts,
            r_series_ohms,
            coefficients,
            clamp,
            divider: SeriesOnly,
        }
    }

    /// Switch to the strategy with a resistor across the thermistor
    pub const fn with_parallel(self, r_parallel_ohms: f32) -> ThermistorConfig<WithParallel> {
        ThermistorConfig {
            resolution: self.resolution,
            vref_volts: self.vref_volts,
            r_series_ohms: self.r_series_ohms,
            coefficients: self.coefficients,
            clamp: self.clamp,
            divider: WithParallel::new(r_parallel_ohms),
        }
    }
}

impl<D: Divider> ThermistorConfig<D> {
    /// Check the constant set for values that would break the conversion
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !positive_finite(self.vref_volts) {
            return Err(ConfigError::InvalidReference);
        }
        if !positive_finite(self.r_series_ohms) {
            return Err(ConfigError::InvalidSeriesResistor);
        }
        self.divider.validate()?;
        self.clamp.validate()?;
        self.coefficients.validate()
    }
}

//! NTC thermistor sensor
//!
//! Polled driver for a thermistor in the lower leg of a voltage divider.
//! Conversion is delegated to ntcsense-core (Steinhart-Hart); this layer
//! adds the ADC read, masking, and open/short/range plausibility checks.

use ntcsense_core::config::{
    AdcResolution, Divider, SeriesOnly, TemperatureRange, ThermistorConfig,
};
use ntcsense_core::traits::{SensorError, TemperatureSensor};
use ntcsense_core::{SensorDivider, RATED_RANGE, SENSOR};

/// Counts from each rail treated as a wiring fault
pub const DEFAULT_FAULT_MARGIN: u32 = 10;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read the raw ADC value
    ///
    /// Bits above the configured resolution are masked off by the driver.
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// ADC codes that indicate a wiring fault rather than a temperature
///
/// Circuit: VREF -- R_series -- ADC_PIN -- NTC -- GND
/// A shorted thermistor pulls the pin to ground, an open one lets it float
/// to VREF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultWindow {
    /// Codes below this read as a short circuit
    pub short_below: u32,
    /// Codes above this read as an open circuit
    pub open_above: u32,
}

impl FaultWindow {
    /// Treat `margin` counts next to each rail as a fault
    pub const fn with_margin(resolution: AdcResolution, margin: u32) -> Self {
        Self {
            short_below: margin,
            open_above: resolution.max_code().saturating_sub(margin),
        }
    }

    /// Never report a wiring fault; every code is converted
    pub const fn disabled() -> Self {
        Self {
            short_below: 0,
            open_above: u32::MAX,
        }
    }

    /// Classify a code
    pub fn check(&self, code: u32) -> Result<(), SensorError> {
        if code < self.short_below {
            return Err(SensorError::ShortCircuit);
        }
        if code > self.open_above {
            return Err(SensorError::OpenCircuit);
        }
        Ok(())
    }
}

/// NTC thermistor read through an ADC channel
pub struct ThermistorSensor<ADC, D = SeriesOnly> {
    adc: ADC,
    config: ThermistorConfig<D>,
    faults: FaultWindow,
    rated: TemperatureRange,
}

impl<ADC> ThermistorSensor<ADC, SensorDivider> {
    /// Create a sensor using the constant set compiled from thermistor.toml
    pub fn from_build_config(adc: ADC) -> Self {
        Self::new(adc, SENSOR, RATED_RANGE)
    }
}

impl<ADC, D: Divider> ThermistorSensor<ADC, D> {
    /// Create a new thermistor sensor
    ///
    /// # Arguments
    /// - `adc`: ADC channel for reading the thermistor
    /// - `config`: circuit and model constants
    /// - `rated`: temperature window the coefficients are valid over
    ///
    /// Uses a fault window of [`DEFAULT_FAULT_MARGIN`] counts at each rail.
    pub fn new(adc: ADC, config: ThermistorConfig<D>, rated: TemperatureRange) -> Self {
        Self {
            adc,
            faults: FaultWindow::with_margin(config.resolution, DEFAULT_FAULT_MARGIN),
            config,
            rated,
        }
    }

    /// Replace the fault window
    pub fn with_fault_window(mut self, faults: FaultWindow) -> Self {
        self.faults = faults;
        self
    }

    pub fn config(&self) -> &ThermistorConfig<D> {
        &self.config
    }

    pub fn fault_window(&self) -> FaultWindow {
        self.faults
    }

    /// Release the ADC channel
    pub fn release(self) -> ADC {
        self.adc
    }

    /// Convert a code that is already masked to the configured resolution
    ///
    /// Returns temperature in °C after open/short and rated-range checks.
    pub fn code_to_celsius(&self, code: u32) -> Result<f32, SensorError> {
        if let Err(e) = self.faults.check(code) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Thermistor fault (adc={}): {}", code, e);
            return Err(e);
        }

        let celsius = self.config.temperature_from_adc(code);

        #[cfg(feature = "defmt")]
        defmt::trace!("Thermistor adc={} -> {}°C", code, celsius);

        if !self.rated.contains(celsius) {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Temperature {}°C outside rated {}..{}",
                celsius,
                self.rated.lower_celsius,
                self.rated.upper_celsius
            );
            return Err(SensorError::OutOfRange);
        }

        Ok(celsius)
    }
}

impl<ADC: AdcReader, D: Divider> ThermistorSensor<ADC, D> {
    /// Read the ADC and mask the value to the configured resolution
    pub fn read_code(&mut self) -> Result<u32, SensorError> {
        let raw = self.adc.read().map_err(|_| {
            #[cfg(feature = "defmt")]
            defmt::warn!("ADC read error");
            SensorError::ConversionError
        })?;
        Ok(self.config.resolution.mask(u32::from(raw)))
    }

    /// Read the thermistor resistance (Ω)
    ///
    /// Only the wiring fault window applies; no rated-range check.
    pub fn read_resistance(&mut self) -> Result<f32, SensorError> {
        let code = self.read_code()?;
        self.faults.check(code)?;
        Ok(self.config.resistance_from_adc(code))
    }
}

impl<ADC: AdcReader, D: Divider> TemperatureSensor for ThermistorSensor<ADC, D> {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let code = self.read_code()?;
        self.code_to_celsius(code)
    }
}

/// Dummy ADC for testing (returns a fixed value)
#[cfg(test)]
pub struct DummyAdc(pub u16);

#[cfg(test)]
impl AdcReader for DummyAdc {
    fn read(&mut self) -> Result<u16, ()> {
        Ok(self.0)
    }
}

/// ADC that always fails
#[cfg(test)]
pub struct FailingAdc;

#[cfg(test)]
impl AdcReader for FailingAdc {
    fn read(&mut self) -> Result<u16, ()> {
        Err(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntcsense_core::config::presets::{NCP18XH103, NCP18XH103_RANGE};

    use proptest::prelude::*;

    fn sensor(code: u16) -> ThermistorSensor<DummyAdc> {
        ThermistorSensor::new(DummyAdc(code), NCP18XH103, NCP18XH103_RANGE)
    }

    #[test]
    fn test_mid_scale_reading() {
        let celsius = sensor(2048).read_celsius().unwrap();
        assert!((celsius - 24.924).abs() < 0.01, "got {}", celsius);
        assert_eq!(sensor(2048).read_celsius_x10(), Ok(249));
    }

    #[test]
    fn test_matches_core_conversion() {
        for code in [208u16, 1000, 2048, 3000, 3894] {
            let celsius = sensor(code).read_celsius().unwrap();
            let expected = NCP18XH103.temperature_from_adc(u32::from(code));
            assert_eq!(celsius.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn test_short_circuit() {
        // ADC at zero = short circuit
        assert_eq!(sensor(0).read_celsius(), Err(SensorError::ShortCircuit));
        assert_eq!(sensor(9).read_celsius(), Err(SensorError::ShortCircuit));
    }

    #[test]
    fn test_open_circuit() {
        // ADC at max = open circuit
        assert_eq!(sensor(4095).read_celsius(), Err(SensorError::OpenCircuit));
        assert_eq!(sensor(4086).read_celsius(), Err(SensorError::OpenCircuit));
    }

    #[test]
    fn test_outside_rated_range() {
        // Code 10 is ~320°C, code 4085 is ~-87°C
        assert_eq!(sensor(10).read_celsius(), Err(SensorError::OutOfRange));
        assert_eq!(sensor(4085).read_celsius(), Err(SensorError::OutOfRange));
        // 207 is just above 125°C, 3895 just below -40°C
        assert_eq!(sensor(207).read_celsius(), Err(SensorError::OutOfRange));
        assert_eq!(sensor(3895).read_celsius(), Err(SensorError::OutOfRange));
    }

    #[test]
    fn test_raw_reading_is_masked() {
        // Stray bit 12 is dropped: 0x1800 reads as 2048
        let mut sensor = sensor(0x1800);
        assert_eq!(sensor.read_code(), Ok(2048));
        assert!(sensor.read_celsius().is_ok());
    }

    #[test]
    fn test_adc_error() {
        let mut sensor = ThermistorSensor::new(FailingAdc, NCP18XH103, NCP18XH103_RANGE);
        assert_eq!(sensor.read_celsius(), Err(SensorError::ConversionError));
        assert_eq!(sensor.read_resistance(), Err(SensorError::ConversionError));
        assert!(!sensor.is_valid());
    }

    #[test]
    fn test_read_resistance() {
        let r = sensor(2048).read_resistance().unwrap();
        assert!((r - 10_004.885).abs() < 0.1, "got {}", r);
        assert_eq!(sensor(0).read_resistance(), Err(SensorError::ShortCircuit));
    }

    #[test]
    fn test_disabled_fault_window_reaches_clamp() {
        let wide = TemperatureRange::new(-273.15, 10_000.0);
        let mut sensor = ThermistorSensor::new(DummyAdc(0), NCP18XH103, wide)
            .with_fault_window(FaultWindow::disabled());

        assert_eq!(sensor.read_resistance(), Ok(1.0e-1));
        let celsius = sensor.read_celsius().unwrap();
        assert!((celsius - 3513.46).abs() < 0.5, "got {}", celsius);
    }

    #[test]
    fn test_fault_window_with_margin() {
        let window = FaultWindow::with_margin(AdcResolution::new(12), 10);
        assert_eq!(window.short_below, 10);
        assert_eq!(window.open_above, 4085);

        let window = FaultWindow::with_margin(AdcResolution::new(2), 10);
        assert_eq!(window.open_above, 0);
    }

    #[test]
    fn test_parallel_configuration() {
        let config = NCP18XH103.with_parallel(100_000.0);
        let mut sensor = ThermistorSensor::new(DummyAdc(2048), config, NCP18XH103_RANGE);

        // 11.1k thermistor behind a 100k parallel resistor: a bit cooler
        let celsius = sensor.read_celsius().unwrap();
        assert!(celsius < 24.9 && celsius > 20.0, "got {}", celsius);
    }

    #[test]
    fn test_build_config_sensor() {
        let mut sensor = ThermistorSensor::from_build_config(DummyAdc(0));
        assert_eq!(sensor.read_celsius(), Err(SensorError::ShortCircuit));
        assert_eq!(sensor.config().validate(), Ok(()));
        let _adc: DummyAdc = sensor.release();
    }

    proptest! {
        #[test]
        fn rated_codes_convert(code in 208u16..=3894) {
            let celsius = sensor(code).read_celsius();
            prop_assert!(celsius.is_ok(), "code {} gave {:?}", code, celsius);
        }

        #[test]
        fn readings_never_panic(raw in any::<u16>()) {
            let _ = sensor(raw).read_celsius();
            let _ = sensor(raw).read_celsius_x10();
        }
    }
}

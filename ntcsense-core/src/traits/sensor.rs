//! Temperature sensor trait

use core::fmt;

use crate::convert::celsius_to_kelvin;

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (open circuit)
    OpenCircuit,
    /// Sensor shorted to ground
    ShortCircuit,
    /// Reading out of expected range
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::OpenCircuit => "thermistor open circuit",
            Self::ShortCircuit => "thermistor short circuit",
            Self::OutOfRange => "temperature outside rated range",
            Self::ConversionError => "ADC conversion failed",
        };
        f.write_str(msg)
    }
}

/// Trait for temperature sensors
///
/// The conversions in [`crate::convert`] never fail; implementations add
/// the plausibility checks (open/short, rated range) that turn a number
/// into a trustworthy reading.
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Takes `&mut self` because ADC reads typically require mutable access.
    fn read_celsius(&mut self) -> Result<f32, SensorError>;

    /// Read the current temperature in kelvin
    fn read_kelvin(&mut self) -> Result<f32, SensorError> {
        self.read_celsius().map(celsius_to_kelvin)
    }

    /// Read the current temperature as fixed point with 0.1°C resolution
    ///
    /// For example, 45.5°C is returned as 455. Rounds to nearest.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        let scaled = libm::roundf(self.read_celsius()? * 10.0);
        if scaled >= i16::MIN as f32 && scaled <= i16::MAX as f32 {
            Ok(scaled as i16)
        } else {
            Err(SensorError::OutOfRange)
        }
    }

    /// Check if the sensor reading is valid
    fn is_valid(&mut self) -> bool {
        self.read_celsius().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<f32, SensorError>);

    impl TemperatureSensor for Fixed {
        fn read_celsius(&mut self) -> Result<f32, SensorError> {
            self.0
        }
    }

    #[test]
    fn test_celsius_x10_rounds() {
        assert_eq!(Fixed(Ok(45.54)).read_celsius_x10(), Ok(455));
        assert_eq!(Fixed(Ok(45.56)).read_celsius_x10(), Ok(456));
        assert_eq!(Fixed(Ok(-12.34)).read_celsius_x10(), Ok(-123));
    }

    #[test]
    fn test_celsius_x10_rejects_unrepresentable() {
        assert_eq!(Fixed(Ok(3000.0)).read_celsius_x10(), Ok(30000));
        // Zero-code reading of the NCP18XH103 set does not fit 0.1°C in i16
        assert_eq!(
            Fixed(Ok(3513.46)).read_celsius_x10(),
            Err(SensorError::OutOfRange)
        );
        assert_eq!(
            Fixed(Ok(5000.0)).read_celsius_x10(),
            Err(SensorError::OutOfRange)
        );
        assert_eq!(
            Fixed(Ok(f32::NAN)).read_celsius_x10(),
            Err(SensorError::OutOfRange)
        );
    }

    #[test]
    fn test_errors_propagate() {
        let mut sensor = Fixed(Err(SensorError::OpenCircuit));
        assert_eq!(sensor.read_kelvin(), Err(SensorError::OpenCircuit));
        assert_eq!(sensor.read_celsius_x10(), Err(SensorError::OpenCircuit));
        assert!(!sensor.is_valid());
    }

    #[test]
    fn test_kelvin_offset() {
        let kelvin = Fixed(Ok(25.0)).read_kelvin().unwrap();
        assert!((kelvin - 298.15).abs() < 1e-4);
    }
}

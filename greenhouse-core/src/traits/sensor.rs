//! Sensor traits

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor disconnected (reading pinned to a rail)
    OpenCircuit,
    /// Reading out of expected range
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}

/// Soil moisture probe
pub trait MoistureSensor {
    /// Read soil moisture on a 10-bit scale (0 = dry air, 1023 = water)
    fn read_moisture(&mut self) -> Result<u16, SensorError>;
}

/// Trait for temperature sensors
pub trait TemperatureSensor {
    /// Read the current temperature in degrees Celsius
    ///
    /// Returns a fixed-point value with 0.1°C resolution.
    /// For example, 24.5°C is returned as 245.
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError>;

    /// Read the current temperature in whole degrees Celsius
    fn read_celsius(&mut self) -> Result<i16, SensorError> {
        self.read_celsius_x10().map(|t| t / 10)
    }
}

/// Ambient light sensor reporting a UV index
pub trait LightSensor {
    fn read_uv_index(&mut self) -> Result<u16, SensorError>;
}

/// Water tank level switch
pub trait LevelSwitch {
    /// Check if the tank is below the switch
    fn is_tank_low(&mut self) -> bool;
}

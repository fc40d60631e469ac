//! Sensor drivers

pub mod die_temp;
pub mod flow;
pub mod level;
pub mod moisture;
pub mod uv;

pub use die_temp::DieTemperatureSensor;
pub use flow::{FlowMeter, PulseSource};
pub use level::GpioLevelSwitch;
pub use moisture::AdcMoistureProbe;
pub use uv::AnalogUvSensor;

use greenhouse_core::traits::SensorError;

/// Full scale of the 12-bit ADC
pub const ADC_MAX: u16 = 4095;

/// ADC reference voltage (mV)
pub const ADC_VREF_MV: u32 = 3300;

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read ADC value (12-bit, 0-4095)
    fn read(&mut self) -> Result<u16, SensorError>;
}

/// Convert a raw 12-bit sample to millivolts
pub fn raw_to_mv(raw: u16) -> u32 {
    raw as u32 * ADC_VREF_MV / ADC_MAX as u32
}

//! Analog UV index sensor
//!
//! Photodiode modules such as the GUVA-S12SD output roughly 100 mV per UV
//! index step.

use greenhouse_core::traits::{LightSensor, SensorError};

use super::{raw_to_mv, AdcReader};

/// Output voltage per UV index step (mV)
pub const MV_PER_UV_INDEX: u32 = 100;

/// Highest UV index the module reports
pub const MAX_UV_INDEX: u16 = 11;

/// UV index sensor on an ADC channel
pub struct AnalogUvSensor<ADC> {
    adc: ADC,
}

impl<ADC> AnalogUvSensor<ADC> {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }
}

impl<ADC: AdcReader> LightSensor for AnalogUvSensor<ADC> {
    fn read_uv_index(&mut self) -> Result<u16, SensorError> {
        let mv = raw_to_mv(self.adc.read()?);
        let index = (mv / MV_PER_UV_INDEX) as u16;
        Ok(index.min(MAX_UV_INDEX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAdc(u16);

    impl AdcReader for FixedAdc {
        fn read(&mut self) -> Result<u16, SensorError> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_dark() {
        assert_eq!(AnalogUvSensor::new(FixedAdc(0)).read_uv_index(), Ok(0));
    }

    #[test]
    fn test_midrange() {
        // ~500 mV
        assert_eq!(AnalogUvSensor::new(FixedAdc(621)).read_uv_index(), Ok(5));
    }

    #[test]
    fn test_clamped() {
        assert_eq!(
            AnalogUvSensor::new(FixedAdc(4095)).read_uv_index(),
            Ok(MAX_UV_INDEX)
        );
    }
}

//! RP2040 on-die temperature sensor
//!
//! T = 27 - (V - 0.706) / 0.001721, from the RP2040 datasheet.

use greenhouse_core::traits::{SensorError, TemperatureSensor};

use super::{AdcReader, ADC_MAX, ADC_VREF_MV};

/// Sensor voltage at 27 °C (µV)
const V27_UV: i32 = 706_000;

/// Slope (µV per °C)
const SLOPE_UV_PER_C: i32 = 1721;

/// RP2040 internal temperature sensor
pub struct DieTemperatureSensor<ADC> {
    adc: ADC,
}

impl<ADC> DieTemperatureSensor<ADC> {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }
}

impl<ADC: AdcReader> TemperatureSensor for DieTemperatureSensor<ADC> {
    fn read_celsius_x10(&mut self) -> Result<i16, SensorError> {
        let raw = self.adc.read()?;
        if raw == 0 || raw >= ADC_MAX {
            return Err(SensorError::OutOfRange);
        }
        let v_uv = (raw as i64 * ADC_VREF_MV as i64 * 1000 / ADC_MAX as i64) as i32;
        let t_x10 = 270 - (v_uv - V27_UV) * 10 / SLOPE_UV_PER_C;
        Ok(t_x10 as i16)
    }
}

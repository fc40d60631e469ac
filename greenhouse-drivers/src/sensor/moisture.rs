//! Soil moisture probe on an ADC channel
//!
//! The control thresholds are on a 10-bit scale, so the 12-bit sample is
//! scaled down. Higher values mean wetter soil.

use greenhouse_core::traits::{MoistureSensor, SensorError};

use super::{AdcReader, ADC_MAX};

/// Analog soil moisture probe
pub struct AdcMoistureProbe<ADC> {
    adc: ADC,
}

impl<ADC> AdcMoistureProbe<ADC> {
    pub fn new(adc: ADC) -> Self {
        Self { adc }
    }
}

impl<ADC: AdcReader> MoistureSensor for AdcMoistureProbe<ADC> {
    fn read_moisture(&mut self) -> Result<u16, SensorError> {
        let raw = self.adc.read()?;
        if raw > ADC_MAX {
            return Err(SensorError::OutOfRange);
        }
        Ok(raw >> 2)
    }
}

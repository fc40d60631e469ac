//! Sensor sampling task
//!
//! Reads every sensor once per sample interval and hands the sweep to
//! the controller. The flow meter is drained once per flow window so the
//! pulse count always covers exactly one window.

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use heapless::Vec;

use greenhouse_core::config::GreenhouseConfig;
use greenhouse_core::control::trimmed_mean;
use greenhouse_core::controller::SensorReadings;
use greenhouse_core::traits::{
    LevelSwitch, LightSensor, MoistureSensor, SensorError, TemperatureSensor,
};
use greenhouse_drivers::sensor::{
    AdcMoistureProbe, AdcReader, AnalogUvSensor, DieTemperatureSensor, FlowMeter,
    GpioLevelSwitch,
};

use crate::channels::SENSOR_READINGS;
use crate::tasks::flow_meter::FlowPulses;

/// Number of soil moisture probes
pub const MOISTURE_PROBES: usize = 3;

/// Analog inputs owned by the sensor task
pub struct AnalogInputs {
    pub adc: Adc<'static, Blocking>,
    pub moisture: [Channel<'static>; MOISTURE_PROBES],
    pub uv: Channel<'static>,
    pub die_temp: Channel<'static>,
}

/// One ADC channel borrowed for a single conversion
struct AdcInput<'a> {
    adc: &'a mut Adc<'static, Blocking>,
    channel: &'a mut Channel<'static>,
}

impl AdcReader for AdcInput<'_> {
    fn read(&mut self) -> Result<u16, SensorError> {
        self.adc
            .blocking_read(self.channel)
            .map_err(|_| SensorError::ConversionError)
    }
}

/// Sensor task - samples all inputs and publishes the readings
#[embassy_executor::task]
pub async fn sensor_task(
    mut analog: AnalogInputs,
    level: Input<'static>,
    config: GreenhouseConfig,
) {
    info!("Sensor task started");

    let mut level = GpioLevelSwitch::new(level);
    let mut flow = FlowMeter::new(FlowPulses, &config.watering);

    let window_ms = flow.window_ms();
    let windows_per_sample = (config.sensors.sample_interval_ms / window_ms).max(1);
    let mut ticker = Ticker::every(Duration::from_millis(window_ms as u64));
    let mut windows = 0;

    loop {
        ticker.next().await;

        let flow_lph = flow.read_lph();
        windows += 1;
        if windows < windows_per_sample {
            continue;
        }
        windows = 0;

        let readings = SensorReadings {
            moisture: read_moisture(&mut analog),
            temperature_c_x10: read_temperature(&mut analog),
            uv_index: read_uv(&mut analog),
            tank_low: level.is_tank_low(),
            flow_lph,
        };
        trace!("Sensors: {:?}", readings);

        SENSOR_READINGS.signal(readings);
    }
}

/// Trimmed mean over all probes, None if any probe failed
fn read_moisture(analog: &mut AnalogInputs) -> Option<u16> {
    let mut values: Vec<u16, MOISTURE_PROBES> = Vec::new();

    for (i, channel) in analog.moisture.iter_mut().enumerate() {
        let mut probe = AdcMoistureProbe::new(AdcInput {
            adc: &mut analog.adc,
            channel,
        });
        match probe.read_moisture() {
            Ok(value) => {
                let _ = values.push(value);
            }
            Err(e) => warn!("Moisture probe {} failed: {:?}", i, e),
        }
    }

    trimmed_mean(&values)
}

fn read_uv(analog: &mut AnalogInputs) -> Option<u16> {
    let mut sensor = AnalogUvSensor::new(AdcInput {
        adc: &mut analog.adc,
        channel: &mut analog.uv,
    });
    match sensor.read_uv_index() {
        Ok(uv) => Some(uv),
        Err(e) => {
            warn!("UV sensor failed: {:?}", e);
            None
        }
    }
}

fn read_temperature(analog: &mut AnalogInputs) -> Option<i16> {
    let mut sensor = DieTemperatureSensor::new(AdcInput {
        adc: &mut analog.adc,
        channel: &mut analog.die_temp,
    });
    match sensor.read_celsius_x10() {
        Ok(t) => Some(t),
        Err(e) => {
            warn!("Temperature sensor failed: {:?}", e);
            None
        }
    }
}

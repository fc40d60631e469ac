//! Greenhouse - Automated Greenhouse Controller Firmware
//!
//! Main firmware binary for RP2040-based greenhouse controllers.
//! Waters the soil from moisture probes, tops up daylight with LED
//! lighting and latches water faults for the operator.
//!
//! Pin map:
//! - GP2 SET button, GP3 MODE button (to 3V3, pulled down)
//! - GP4/GP5 encoder A/B
//! - GP6 LED lighting relay, GP8 pump relay (active low)
//! - GP7 tank level float switch
//! - GP9 flow meter pulses
//! - GP26..GP28 soil moisture probes, GP29 UV sensor

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use {defmt_rtt as _, panic_probe as _};

use greenhouse_core::config::{parse_config, GreenhouseConfig};

/// Embedded configuration (compiled into firmware)
/// Edit greenhouse.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../greenhouse.toml");

mod channels;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Greenhouse firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Front panel
    let set_button = Input::new(p.PIN_2, Pull::Down);
    let mode_button = Input::new(p.PIN_3, Pull::Down);
    let enc_a = Input::new(p.PIN_4, Pull::Up);
    let enc_b = Input::new(p.PIN_5, Pull::Up);

    // Relays start released (active low)
    let led_relay = Output::new(p.PIN_6, Level::High);
    let pump_relay = Output::new(p.PIN_8, Level::High);

    let level_switch = Input::new(p.PIN_7, Pull::Down);
    let flow_pulses = Input::new(p.PIN_9, Pull::Up);

    let analog = tasks::AnalogInputs {
        adc: Adc::new_blocking(p.ADC, AdcConfig::default()),
        moisture: [
            Channel::new_pin(p.PIN_26, Pull::None),
            Channel::new_pin(p.PIN_27, Pull::None),
            Channel::new_pin(p.PIN_28, Pull::None),
        ],
        uv: Channel::new_pin(p.PIN_29, Pull::None),
        die_temp: Channel::new_temp_sensor(p.ADC_TEMP_SENSOR),
    };
    info!("ADC initialized");

    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::button_task(
            set_button,
            mode_button,
            config.buttons.debounce_ms,
        ))
        .unwrap();
    spawner.spawn(tasks::encoder_task(enc_a, enc_b)).unwrap();
    spawner.spawn(tasks::flow_meter_task(flow_pulses)).unwrap();
    spawner
        .spawn(tasks::sensor_task(analog, level_switch, config))
        .unwrap();
    spawner
        .spawn(tasks::actuator_task(pump_relay, led_relay))
        .unwrap();
    spawner.spawn(tasks::display_task()).unwrap();
    spawner.spawn(tasks::controller_task(config)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
///
/// build.rs rejects an invalid greenhouse.toml, so the fallback only
/// matters if the two parsers disagree.
fn load_config() -> GreenhouseConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            debug!("Config: {:?}", config);
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using built-in defaults");
            GreenhouseConfig::default()
        }
    }
}

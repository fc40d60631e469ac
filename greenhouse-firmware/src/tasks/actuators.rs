//! Actuator task
//!
//! Drives the pump and LED relays from the controller's commands.

use defmt::*;
use embassy_rp::gpio::Output;

use greenhouse_core::traits::RelayOutput;
use greenhouse_drivers::relay::GpioRelay;

use crate::channels::ACTUATOR_CMD;

/// Actuator task - applies actuator commands to the relays
#[embassy_executor::task]
pub async fn actuator_task(pump: Output<'static>, led: Output<'static>) {
    info!("Actuator task started");

    // Relay module inputs are active-low
    let mut pump = GpioRelay::new_active_low(pump);
    let mut led = GpioRelay::new_active_low(led);

    loop {
        let cmd = ACTUATOR_CMD.wait().await;

        if cmd.pump_on != pump.is_on() {
            info!("Pump {}", if cmd.pump_on { "ON" } else { "OFF" });
            pump.set_on(cmd.pump_on);
        }
        if cmd.led_on != led.is_on() {
            info!("LED lighting {}", if cmd.led_on { "ON" } else { "OFF" });
            led.set_on(cmd.led_on);
        }
    }
}

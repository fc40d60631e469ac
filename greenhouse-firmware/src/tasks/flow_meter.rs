//! Flow meter pulse counter task
//!
//! Counts falling edges of the hall sensor into an atomic counter that
//! the sensor task drains once per measurement window.

use defmt::*;
use embassy_rp::gpio::Input;
use portable_atomic::{AtomicU32, Ordering};

use greenhouse_drivers::sensor::PulseSource;

/// Pulses counted since the last read
static FLOW_PULSES: AtomicU32 = AtomicU32::new(0);

/// Reader side of the pulse counter
pub struct FlowPulses;

impl PulseSource for FlowPulses {
    fn take_pulses(&mut self) -> u32 {
        FLOW_PULSES.swap(0, Ordering::Relaxed)
    }
}

/// Flow meter task - counts sensor pulses
#[embassy_executor::task]
pub async fn flow_meter_task(mut pin: Input<'static>) {
    info!("Flow meter task started");

    loop {
        pin.wait_for_falling_edge().await;
        FLOW_PULSES.fetch_add(1, Ordering::Relaxed);
    }
}

//! Periodic tick for the controller
//!
//! The controller turns the timestamps into clock seconds, the blink
//! phase of the setup screen and the startup image timeout, so a late
//! tick only delays the update and never loses time.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick period (ms)
pub const TICK_INTERVAL_MS: u64 = 100;

/// Latest tick timestamp in ms since boot, wrapping
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started, period {} ms", TICK_INTERVAL_MS);

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis() as u32);
    }
}

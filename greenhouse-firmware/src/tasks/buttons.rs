//! Front panel button task
//!
//! Each pin raises an edge per press. Contact bounce is filtered by the
//! per-button debounce window, not by sleeping.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use greenhouse_core::input::{ButtonId, ButtonInputs, InputEvent};

use crate::channels::INPUT_CHANNEL;

/// Button task - forwards debounced SET and MODE presses to the controller
#[embassy_executor::task]
pub async fn button_task(mut set: Input<'static>, mut mode: Input<'static>, debounce_ms: u32) {
    info!("Button task started");

    let mut buttons = ButtonInputs::new(debounce_ms);

    loop {
        let id = match select(set.wait_for_rising_edge(), mode.wait_for_rising_edge()).await {
            Either::First(()) => ButtonId::Set,
            Either::Second(()) => ButtonId::Mode,
        };

        let now_ms = Instant::now().as_millis() as u32;
        if !buttons.accept_edge(id, now_ms) {
            trace!("Bounce on {:?} ignored", id);
            continue;
        }

        debug!("Button: {:?}", id);
        if INPUT_CHANNEL.try_send(InputEvent::Button(id)).is_err() {
            warn!("Input queue full, dropped {:?}", id);
        }
    }
}

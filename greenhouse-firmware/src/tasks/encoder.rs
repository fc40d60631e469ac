//! Rotary encoder task
//!
//! Polls the quadrature pins and forwards full detents.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};

use greenhouse_core::input::{InputEvent, QuadratureDecoder};

use crate::channels::INPUT_CHANNEL;

/// Encoder poll interval, fast enough for hand-turned knobs
const POLL_INTERVAL_MS: u64 = 1;

/// Encoder task - decodes rotation into input events
#[embassy_executor::task]
pub async fn encoder_task(a: Input<'static>, b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(a.is_high(), b.is_high());
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        if let Some(rotation) = decoder.update(a.is_high(), b.is_high()) {
            debug!("Encoder: {:?}", rotation);
            if INPUT_CHANNEL.try_send(InputEvent::Encoder(rotation)).is_err() {
                warn!("Input queue full, dropped encoder step");
            }
        }
    }
}

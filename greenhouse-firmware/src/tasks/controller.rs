//! Main controller task
//!
//! Coordinates the display mode state machine and the control loop.
//! Receives input events, tick signals and sensor sweeps, updates the
//! actuator commands, and triggers display updates.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Instant;

use greenhouse_core::config::GreenhouseConfig;
use greenhouse_core::controller::{Controller, InputOutcome};
use greenhouse_core::safety::{FaultKind, FaultLatches};
use greenhouse_core::state::{Command, Transition};
use greenhouse_display::Renderer;

use crate::channels::{ACTUATOR_CMD, INPUT_CHANNEL, SCREEN_UPDATE, SENSOR_READINGS};
use crate::tasks::display::SCREEN_BUFFER;
use crate::tasks::tick::TICK_SIGNAL;

const FAULT_KINDS: [FaultKind; 3] = [
    FaultKind::WaterLevel,
    FaultKind::WaterFlow,
    FaultKind::LedLight,
];

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: GreenhouseConfig) {
    info!("Controller task started");

    let mut controller = Controller::new(config);
    let mut renderer = Renderer::new();

    // Everything off until the program is started
    ACTUATOR_CMD.signal(controller.actuator_command());
    render(&controller, &mut renderer).await;

    loop {
        match select3(
            INPUT_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
            SENSOR_READINGS.wait(),
        )
        .await
        {
            Either3::First(input) => {
                debug!("Input: {:?}", input);
                match controller.process_input(input) {
                    InputOutcome::Ignored => continue,
                    InputOutcome::Updated => {}
                    InputOutcome::Transitioned(transition) => {
                        log_transition(&transition);
                        ACTUATOR_CMD.signal(controller.actuator_command());
                    }
                }
                render(&controller, &mut renderer).await;
            }

            Either3::Second(now_ms) => {
                let outcome = controller.tick(now_ms);
                if let Some(transition) = &outcome.transition {
                    log_transition(transition);
                    ACTUATOR_CMD.signal(controller.actuator_command());
                }
                if outcome.needs_redraw() {
                    render(&controller, &mut renderer).await;
                }
            }

            Either3::Third(readings) => {
                let before = *controller.state().faults();
                let now_ms = Instant::now().as_millis() as u32;
                let cmd = controller.update_readings(readings, now_ms);
                log_fault_changes(&before, controller.state().faults());

                ACTUATOR_CMD.signal(cmd);
                render(&controller, &mut renderer).await;
            }
        }
    }
}

/// Render the current state into the shared screen buffer
async fn render(controller: &Controller, renderer: &mut Renderer) {
    renderer.render(&controller.snapshot());

    {
        let mut screen = SCREEN_BUFFER.lock().await;
        *screen = renderer.screen().clone();
    }

    SCREEN_UPDATE.signal(());
}

fn log_transition(transition: &Transition) {
    if transition.mode_changed() {
        info!(
            "Mode: {} -> {}",
            transition.from.mode.label(),
            transition.to.mode.label()
        );
    } else {
        debug!(
            "Clock input: {:?} -> {:?}",
            transition.from.clock_input, transition.to.clock_input
        );
    }

    if transition.has(Command::StartClock) {
        info!("Clock started");
    }
    if transition.has(Command::StopPump) {
        warn!("Flow fault not cleared, rebooting to startup image");
    }
}

fn log_fault_changes(before: &FaultLatches, after: &FaultLatches) {
    for kind in FAULT_KINDS {
        match (before.is_set(kind), after.is_set(kind)) {
            (false, true) => warn!("Fault set: {}", kind.label()),
            (true, false) => info!("Fault cleared: {}", kind.label()),
            _ => {}
        }
    }
}

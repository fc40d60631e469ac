//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use greenhouse_core::controller::{ActuatorCommand, SensorReadings};
use greenhouse_core::input::InputEvent;

/// Channel capacity for input events
const INPUT_CHANNEL_SIZE: usize = 8;

/// Debounced button presses and encoder detents
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Latest sensor sweep (updated by sensor task)
pub static SENSOR_READINGS: Signal<CriticalSectionRawMutex, SensorReadings> = Signal::new();

/// Actuator command signal (updated by controller)
pub static ACTUATOR_CMD: Signal<CriticalSectionRawMutex, ActuatorCommand> = Signal::new();

/// Signal that a screen update is ready to be drawn
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

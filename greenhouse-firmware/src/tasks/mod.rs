//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod actuators;
pub mod buttons;
pub mod controller;
pub mod display;
pub mod encoder;
pub mod flow_meter;
pub mod sensors;
pub mod tick;

pub use actuators::actuator_task;
pub use buttons::button_task;
pub use controller::controller_task;
pub use display::display_task;
pub use encoder::encoder_task;
pub use flow_meter::flow_meter_task;
pub use sensors::{sensor_task, AnalogInputs};
pub use tick::tick_task;

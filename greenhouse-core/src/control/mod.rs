//! Watering, lighting and temperature control logic
//!
//! Pure threshold functions; the controller feeds them readings and
//! applies the results to the fault latches and actuators.

pub mod lighting;
pub mod moisture;
pub mod temperature;
pub mod watering;

pub use lighting::{in_window, led_fault, light_need};
pub use moisture::{trimmed_mean, MoistureLevel};
pub use temperature::TemperatureLimit;
pub use watering::{flow_lph, water_need, FlowMonitor};

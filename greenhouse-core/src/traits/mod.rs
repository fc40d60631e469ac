//! Hardware abstraction traits
//!
//! Implemented by `greenhouse-drivers` for the concrete parts.

pub mod relay;
pub mod sensor;

pub use relay::RelayOutput;
pub use sensor::{LevelSwitch, LightSensor, MoistureSensor, SensorError, TemperatureSensor};

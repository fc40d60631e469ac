//! Display mode state machine and the greenhouse state it drives

pub mod commands;
pub mod greenhouse;
pub mod machine;

pub use commands::Command;
pub use greenhouse::GreenhouseState;
pub use machine::{ClockInputState, Commands, DisplayMode, ModeState, Transition};

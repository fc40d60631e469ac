//! Board-agnostic core logic for the greenhouse controller firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display-mode / clock-setting state machine
//! - Time-of-day clock with setup cursors
//! - Button debouncing and rotary encoder decoding
//! - Fault latches for the water and lighting subsystems
//! - Watering, lighting and temperature threshold logic
//! - Configuration types and a minimal TOML parser
//! - Hardware abstraction traits (relays, sensors)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod control;
pub mod controller;
pub mod input;
pub mod safety;
pub mod state;
pub mod traits;

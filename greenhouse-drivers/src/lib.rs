//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in greenhouse-core for the greenhouse hardware:
//!
//! - Relay outputs (pump, LED lighting) over embedded-hal GPIO
//! - Capacitive soil moisture probes (ADC)
//! - Analog UV index sensor (ADC)
//! - RP2040 die temperature sensor (ADC)
//! - Tank level float switch (GPIO)
//! - Hall-effect flow meter (pulse counter)

#![no_std]
#![deny(unsafe_code)]

pub mod relay;
pub mod sensor;

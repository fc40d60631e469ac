//! Fault latches

pub mod faults;

pub use faults::{FaultKind, FaultLatches};

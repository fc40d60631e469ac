//! Time-of-day clock and setup cursors

pub mod cursors;
pub mod ticker;

pub use cursors::TimeCursors;
pub use ticker::Clock;

//! Free-running time-of-day clock

use super::cursors::TimeCursors;

/// Time-of-day clock advanced one second per `tick()`
///
/// The clock only counts while started. Starting it happens when the
/// operator completes the setup sequence; resetting stops it and returns
/// every digit to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clock {
    cursors: TimeCursors,
    running: bool,
}

impl Clock {
    /// Create a stopped clock at 00:00:00
    pub const fn new() -> Self {
        Self {
            cursors: TimeCursors::zero(),
            running: false,
        }
    }

    /// Current digits
    pub fn cursors(&self) -> &TimeCursors {
        &self.cursors
    }

    /// Digits for the setup screen to edit
    pub fn cursors_mut(&mut self) -> &mut TimeCursors {
        &mut self.cursors
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start counting from the current digits
    pub fn start(&mut self) {
        self.cursors.normalize();
        self.running = true;
    }

    /// Stop the clock and zero every digit
    pub fn reset(&mut self) {
        self.running = false;
        self.cursors = TimeCursors::zero();
    }

    /// Current time as HHMM (6:31 → 631)
    pub fn current_time_as_int(&self) -> u16 {
        self.cursors.as_hhmm()
    }

    /// Advance by one second
    ///
    /// No-op while the clock is stopped. Returns true if the time changed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let c = &mut self.cursors;
        c.second_units += 1;
        if c.second_units < 10 {
            return true;
        }
        c.second_units = 0;

        c.second_tens += 1;
        if c.second_tens < 6 {
            return true;
        }
        c.second_tens = 0;

        c.minute_units += 1;
        if c.minute_units < 10 {
            return true;
        }
        c.minute_units = 0;

        c.minute_tens += 1;
        if c.minute_tens < 6 {
            return true;
        }
        c.minute_tens = 0;

        c.hour_units += 1;
        if c.hour_units >= 10 {
            c.hour_units = 0;
            c.hour_tens += 1;
        }
        c.normalize();
        true
    }
}

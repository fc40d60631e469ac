//! Time-of-day digit cursors
//!
//! The clock is kept as six decimal digits so the setup screen can edit
//! one digit at a time and the renderer can print them directly.

use crate::state::ClockInputState;

/// Six bounded digit counters making up a 24 hour time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeCursors {
    pub hour_tens: u8,
    pub hour_units: u8,
    pub minute_tens: u8,
    pub minute_units: u8,
    pub second_tens: u8,
    pub second_units: u8,
}

impl TimeCursors {
    /// Midnight
    pub const fn zero() -> Self {
        Self {
            hour_tens: 0,
            hour_units: 0,
            minute_tens: 0,
            minute_units: 0,
            second_tens: 0,
            second_units: 0,
        }
    }

    /// Build cursors from hours, minutes and seconds
    ///
    /// Returns `None` if the time is not a valid time of day.
    pub fn from_hms(hours: u8, minutes: u8, seconds: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return None;
        }
        Some(Self {
            hour_tens: hours / 10,
            hour_units: hours % 10,
            minute_tens: minutes / 10,
            minute_units: minutes % 10,
            second_tens: seconds / 10,
            second_units: seconds % 10,
        })
    }

    pub fn hours(&self) -> u8 {
        self.hour_tens * 10 + self.hour_units
    }

    pub fn minutes(&self) -> u8 {
        self.minute_tens * 10 + self.minute_units
    }

    pub fn seconds(&self) -> u8 {
        self.second_tens * 10 + self.second_units
    }

    /// Current time as HHMM (6:31 → 631)
    pub fn as_hhmm(&self) -> u16 {
        self.hours() as u16 * 100 + self.minutes() as u16
    }

    /// Fold 24:xx back to 00:xx
    pub fn normalize(&mut self) {
        if self.hours() >= 24 {
            self.hour_tens = 0;
            self.hour_units = 0;
        }
    }

    /// Increment the digit selected by the setup sub-state
    ///
    /// Each digit wraps on its own without carrying into its neighbour.
    /// Hour units may reach 4 while hour tens is 2; the resulting 24 is
    /// folded to 00 when the clock starts.
    pub fn increment(&mut self, input: ClockInputState) {
        match input {
            ClockInputState::Hour2 => {
                self.hour_tens += 1;
                if self.hour_tens >= 3 || (self.hour_tens == 2 && self.hour_units > 4) {
                    self.hour_tens = 0;
                }
            }
            ClockInputState::Hour1 => {
                self.hour_units += 1;
                let limit = if self.hour_tens == 2 { 5 } else { 10 };
                if self.hour_units >= limit {
                    self.hour_units = 0;
                }
            }
            ClockInputState::Minute2 => {
                self.minute_tens += 1;
                if self.minute_tens >= 6 {
                    self.minute_tens = 0;
                }
            }
            ClockInputState::Minute1 => {
                self.minute_units += 1;
                if self.minute_units >= 10 {
                    self.minute_units = 0;
                }
            }
            ClockInputState::Completed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_tens_wraps_at_three() {
        let mut c = TimeCursors::zero();
        c.increment(ClockInputState::Hour2);
        assert_eq!(c.hour_tens, 1);
        c.increment(ClockInputState::Hour2);
        assert_eq!(c.hour_tens, 2);
        c.increment(ClockInputState::Hour2);
        assert_eq!(c.hour_tens, 0);
    }

    #[test]
    fn test_hour_tens_skips_two_when_units_too_high() {
        let mut c = TimeCursors::zero();
        c.hour_tens = 1;
        c.hour_units = 7;
        c.increment(ClockInputState::Hour2);
        assert_eq!(c.hour_tens, 0);
    }

    #[test]
    fn test_hour_units_ceiling_with_tens_two() {
        let mut c = TimeCursors::zero();
        c.hour_tens = 2;
        c.hour_units = 3;
        c.increment(ClockInputState::Hour1);
        assert_eq!(c.hour_units, 4);
        c.increment(ClockInputState::Hour1);
        assert_eq!(c.hour_units, 0);
    }

    #[test]
    fn test_hour_units_wraps_at_ten_otherwise() {
        let mut c = TimeCursors::zero();
        c.hour_tens = 1;
        c.hour_units = 9;
        c.increment(ClockInputState::Hour1);
        assert_eq!(c.hour_units, 0);
        assert_eq!(c.hour_tens, 1);
    }

    #[test]
    fn test_minute_tens_wraps_at_six() {
        let mut c = TimeCursors::zero();
        c.minute_tens = 5;
        c.increment(ClockInputState::Minute2);
        assert_eq!(c.minute_tens, 0);
    }

    #[test]
    fn test_minute_units_wraps_at_ten() {
        let mut c = TimeCursors::zero();
        c.minute_units = 9;
        c.increment(ClockInputState::Minute1);
        assert_eq!(c.minute_units, 0);
        assert_eq!(c.minute_tens, 0);
    }

    #[test]
    fn test_completed_does_not_edit() {
        let mut c = TimeCursors::from_hms(12, 34, 56).unwrap();
        let before = c;
        c.increment(ClockInputState::Completed);
        assert_eq!(c, before);
    }

    #[test]
    fn test_hhmm() {
        let c = TimeCursors::from_hms(6, 31, 0).unwrap();
        assert_eq!(c.as_hhmm(), 631);
        let c = TimeCursors::from_hms(23, 59, 59).unwrap();
        assert_eq!(c.as_hhmm(), 2359);
    }

    #[test]
    fn test_normalize_folds_24() {
        let mut c = TimeCursors::zero();
        c.hour_tens = 2;
        c.hour_units = 4;
        c.minute_tens = 1;
        c.normalize();
        assert_eq!(c.hours(), 0);
        assert_eq!(c.minutes(), 10);
    }

    #[test]
    fn test_from_hms_rejects_invalid() {
        assert!(TimeCursors::from_hms(24, 0, 0).is_none());
        assert!(TimeCursors::from_hms(0, 60, 0).is_none());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn any_input() -> impl Strategy<Value = ClockInputState> {
            prop_oneof![
                Just(ClockInputState::Hour2),
                Just(ClockInputState::Hour1),
                Just(ClockInputState::Minute2),
                Just(ClockInputState::Minute1),
                Just(ClockInputState::Completed),
            ]
        }

        proptest! {
            #[test]
            fn edits_never_leave_digit_bounds(
                presses in proptest::collection::vec(any_input(), 0..64)
            ) {
                let mut c = TimeCursors::zero();
                for input in presses {
                    c.increment(input);
                    prop_assert!(c.hour_tens <= 2);
                    prop_assert!(c.hour_units <= 9);
                    prop_assert!(c.minute_tens <= 5);
                    prop_assert!(c.minute_units <= 9);
                    prop_assert!(c.hours() <= 24);
                }
                c.normalize();
                prop_assert!(c.hours() <= 23);
            }
        }
    }
}

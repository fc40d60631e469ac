//! Temperature limit handling
//!
//! The limit is held in half degrees so the encoder can step it by 0.5 °C.

use crate::config::{TEMP_LIMIT_MAX_HALF_C, TEMP_LIMIT_MIN_HALF_C};

/// Operator adjustable temperature limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureLimit {
    half_c: u8,
}

impl TemperatureLimit {
    /// Create a limit, clamped to the selectable range
    pub fn new(half_c: u8) -> Self {
        Self {
            half_c: half_c.clamp(TEMP_LIMIT_MIN_HALF_C, TEMP_LIMIT_MAX_HALF_C),
        }
    }

    pub fn half_c(&self) -> u8 {
        self.half_c
    }

    /// Limit in 0.1 °C units
    pub fn celsius_x10(&self) -> i16 {
        self.half_c as i16 * 5
    }

    /// Raise by half a degree; returns true if it changed
    pub fn increase(&mut self) -> bool {
        if self.half_c < TEMP_LIMIT_MAX_HALF_C {
            self.half_c += 1;
            true
        } else {
            false
        }
    }

    /// Lower by half a degree; returns true if it changed
    pub fn decrease(&mut self) -> bool {
        if self.half_c > TEMP_LIMIT_MIN_HALF_C {
            self.half_c -= 1;
            true
        } else {
            false
        }
    }

    /// Check if a temperature (0.1 °C units) is above the limit
    pub fn is_exceeded(&self, temp_c_x10: i16) -> bool {
        temp_c_x10 > self.celsius_x10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limit_is_30c() {
        let limit = TemperatureLimit::new(60);
        assert_eq!(limit.celsius_x10(), 300);
        assert!(!limit.is_exceeded(300));
        assert!(limit.is_exceeded(301));
    }

    #[test]
    fn test_clamped_range() {
        let mut limit = TemperatureLimit::new(80);
        assert!(!limit.increase());
        assert_eq!(limit.half_c(), 80);

        let mut limit = TemperatureLimit::new(28);
        assert!(!limit.decrease());
        assert_eq!(limit.half_c(), 28);

        assert_eq!(TemperatureLimit::new(200).half_c(), 80);
        assert_eq!(TemperatureLimit::new(0).half_c(), 28);
    }

    #[test]
    fn test_half_degree_steps() {
        let mut limit = TemperatureLimit::new(60);
        assert!(limit.increase());
        assert_eq!(limit.celsius_x10(), 305);
        assert!(limit.decrease());
        assert!(limit.decrease());
        assert_eq!(limit.celsius_x10(), 295);
    }
}

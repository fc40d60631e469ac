//! Quadrature rotary encoder decoding
//!
//! Uses a small state machine for reliable decoding with noise rejection.
//! The decoder is fed pin levels and knows nothing about timing.

/// Direction of one encoder detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// Decoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature decoder
#[derive(Debug, Clone, Copy)]
pub struct QuadratureDecoder {
    phase: Phase,
    last_a: bool,
    last_b: bool,
}

impl QuadratureDecoder {
    /// Create a decoder seeded with the current pin levels
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            phase: Phase::Idle,
            last_a: a,
            last_b: b,
        }
    }

    /// Feed the current pin levels
    ///
    /// Returns a rotation once a full detent has been seen.
    ///
    /// CW:  Idle (1,1) -> CwStep1 (0,1) -> CwStep2 (0,0) -> Clockwise
    /// CCW: Idle (1,1) -> CcwStep1 (1,0) -> CcwStep2 (0,0) -> CounterClockwise
    pub fn update(&mut self, a: bool, b: bool) -> Option<Rotation> {
        if a == self.last_a && b == self.last_b {
            return None;
        }
        self.last_a = a;
        self.last_b = b;

        match self.phase {
            Phase::Idle => {
                if !a && b {
                    self.phase = Phase::CwStep1;
                } else if a && !b {
                    self.phase = Phase::CcwStep1;
                }
                None
            }
            Phase::CwStep1 => {
                if !a && !b {
                    self.phase = Phase::CwStep2;
                } else if a && b {
                    // Bounce
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::CwStep2 => {
                if a || b {
                    self.phase = Phase::Idle;
                    return Some(Rotation::Clockwise);
                }
                None
            }
            Phase::CcwStep1 => {
                if !a && !b {
                    self.phase = Phase::CcwStep2;
                } else if a && b {
                    // Bounce
                    self.phase = Phase::Idle;
                }
                None
            }
            Phase::CcwStep2 => {
                if a || b {
                    self.phase = Phase::Idle;
                    return Some(Rotation::CounterClockwise);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(decoder: &mut QuadratureDecoder, steps: &[(bool, bool)]) -> Option<Rotation> {
        let mut out = None;
        for &(a, b) in steps {
            if let Some(r) = decoder.update(a, b) {
                out = Some(r);
            }
        }
        out
    }

    #[test]
    fn test_clockwise_detent() {
        let mut d = QuadratureDecoder::new(true, true);
        let r = feed(&mut d, &[(false, true), (false, false), (true, false)]);
        assert_eq!(r, Some(Rotation::Clockwise));
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut d = QuadratureDecoder::new(true, true);
        let r = feed(&mut d, &[(true, false), (false, false), (false, true)]);
        assert_eq!(r, Some(Rotation::CounterClockwise));
    }

    #[test]
    fn test_bounce_returns_to_idle() {
        let mut d = QuadratureDecoder::new(true, true);
        assert_eq!(feed(&mut d, &[(false, true), (true, true)]), None);
        assert_eq!(d.phase, Phase::Idle);
    }

    #[test]
    fn test_unchanged_levels_ignored() {
        let mut d = QuadratureDecoder::new(true, true);
        assert_eq!(d.update(true, true), None);
        assert_eq!(d.phase, Phase::Idle);
    }
}

//! Timestamp-based button debouncing
//!
//! A press is accepted when the button shows a rising edge and at least
//! the debounce window has passed since the previous accepted press of
//! the same button. Nothing here waits; callers pass the current time.

/// Logical buttons on the front panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Increments the edited digit / toggles the flow fault acknowledgment
    Set,
    /// Advances the display mode
    Mode,
}

/// Debounce state for a single button
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window_ms: u32,
    last_accepted_ms: Option<u32>,
    last_level: bool,
}

impl Debouncer {
    /// Create a debouncer with the given window
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: None,
            last_level: false,
        }
    }

    /// Sample the button level; returns true on an accepted press
    pub fn poll(&mut self, level: bool, now_ms: u32) -> bool {
        let rising = level && !self.last_level;
        self.last_level = level;
        rising && self.accept(now_ms)
    }

    /// Gate an already detected edge by the debounce window
    ///
    /// Used when the hardware reports edges directly (pin interrupts).
    pub fn accept(&mut self, now_ms: u32) -> bool {
        let open = match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.window_ms,
        };
        if open {
            self.last_accepted_ms = Some(now_ms);
        }
        open
    }
}

/// Debouncers for both front panel buttons
#[derive(Debug, Clone, Copy)]
pub struct ButtonInputs {
    set: Debouncer,
    mode: Debouncer,
}

impl ButtonInputs {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            set: Debouncer::new(window_ms),
            mode: Debouncer::new(window_ms),
        }
    }

    /// Sample one button; true at most once per physical press
    pub fn poll_button(&mut self, id: ButtonId, level: bool, now_ms: u32) -> bool {
        self.debouncer(id).poll(level, now_ms)
    }

    /// Gate an edge reported by hardware
    pub fn accept_edge(&mut self, id: ButtonId, now_ms: u32) -> bool {
        self.debouncer(id).accept(now_ms)
    }

    fn debouncer(&mut self, id: ButtonId) -> &mut Debouncer {
        match id {
            ButtonId::Set => &mut self.set,
            ButtonId::Mode => &mut self.mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_accepted() {
        let mut d = Debouncer::new(170);
        assert!(d.poll(true, 5));
    }

    #[test]
    fn test_held_button_fires_once() {
        let mut d = Debouncer::new(170);
        assert!(d.poll(true, 0));
        assert!(!d.poll(true, 200));
        assert!(!d.poll(true, 400));
    }

    #[test]
    fn test_bounce_inside_window_rejected() {
        let mut d = Debouncer::new(170);
        assert!(d.poll(true, 1000));
        assert!(!d.poll(false, 1010));
        assert!(!d.poll(true, 1020));
        assert!(!d.poll(false, 1100));
        assert!(d.poll(true, 1170));
    }

    #[test]
    fn test_rejected_edge_does_not_extend_window() {
        let mut d = Debouncer::new(170);
        assert!(d.accept(0));
        assert!(!d.accept(100));
        assert!(d.accept(170));
    }

    #[test]
    fn test_window_survives_timer_wrap() {
        let mut d = Debouncer::new(170);
        assert!(d.accept(u32::MAX - 50));
        assert!(!d.accept(50));
        assert!(d.accept(150));
    }

    #[test]
    fn test_buttons_debounced_independently() {
        let mut inputs = ButtonInputs::new(170);
        assert!(inputs.poll_button(ButtonId::Set, true, 0));
        assert!(inputs.poll_button(ButtonId::Mode, true, 10));
        assert!(!inputs.accept_edge(ButtonId::Set, 100));
        assert!(inputs.accept_edge(ButtonId::Mode, 180));
    }
}

//! Latched fault flags
//!
//! Faults are domain conditions, not errors. They are raised by the
//! sensor evaluation in the control loop and read by the mode state
//! machine, the alarm banner and the service screen.

/// Fault conditions watched by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Water tank level switch reports the tank is too low
    WaterLevel,
    /// Pump running without enough flow
    WaterFlow,
    /// LEDs commanded on but no light measured
    LedLight,
}

impl FaultKind {
    /// Short label for banners and logs
    pub fn label(&self) -> &'static str {
        match self {
            FaultKind::WaterLevel => "LEVEL",
            FaultKind::WaterFlow => "FLOW",
            FaultKind::LedLight => "LED",
        }
    }
}

/// Current fault latches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaultLatches {
    water_level: bool,
    water_flow: bool,
    led_light: bool,
}

impl FaultLatches {
    /// No faults active
    pub const fn new() -> Self {
        Self {
            water_level: false,
            water_flow: false,
            led_light: false,
        }
    }

    /// Set or clear one latch; returns true if the latch changed
    pub fn set(&mut self, kind: FaultKind, active: bool) -> bool {
        let latch = match kind {
            FaultKind::WaterLevel => &mut self.water_level,
            FaultKind::WaterFlow => &mut self.water_flow,
            FaultKind::LedLight => &mut self.led_light,
        };
        let changed = *latch != active;
        *latch = active;
        changed
    }

    pub fn is_set(&self, kind: FaultKind) -> bool {
        match kind {
            FaultKind::WaterLevel => self.water_level,
            FaultKind::WaterFlow => self.water_flow,
            FaultKind::LedLight => self.led_light,
        }
    }

    pub fn water_level(&self) -> bool {
        self.water_level
    }

    pub fn water_flow(&self) -> bool {
        self.water_flow
    }

    pub fn led_light(&self) -> bool {
        self.led_light
    }

    /// Check if any latch is set
    pub fn any(&self) -> bool {
        self.water_level || self.water_flow || self.led_light
    }

    /// Iterate over the active faults in display order
    pub fn active(&self) -> impl Iterator<Item = FaultKind> + '_ {
        [FaultKind::WaterLevel, FaultKind::WaterFlow, FaultKind::LedLight]
            .into_iter()
            .filter(move |k| self.is_set(*k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_faults() {
        let f = FaultLatches::new();
        assert!(!f.any());
        assert_eq!(f.active().count(), 0);
    }

    #[test]
    fn test_set_reports_change() {
        let mut f = FaultLatches::new();
        assert!(f.set(FaultKind::WaterFlow, true));
        assert!(!f.set(FaultKind::WaterFlow, true));
        assert!(f.water_flow());
        assert!(f.set(FaultKind::WaterFlow, false));
        assert!(!f.any());
    }

    #[test]
    fn test_active_order() {
        let mut f = FaultLatches::new();
        f.set(FaultKind::LedLight, true);
        f.set(FaultKind::WaterLevel, true);
        let mut it = f.active();
        assert_eq!(it.next(), Some(FaultKind::WaterLevel));
        assert_eq!(it.next(), Some(FaultKind::LedLight));
        assert_eq!(it.next(), None);
    }
}

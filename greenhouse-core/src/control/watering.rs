//! Watering decisions and flow supervision

use super::moisture::MoistureLevel;
use crate::config::WateringConfig;
use crate::safety::FaultLatches;

/// Decide whether the pump should run
///
/// Water only dry soil, and never with a level or flow fault latched.
pub fn water_need(level: MoistureLevel, faults: &FaultLatches) -> bool {
    level == MoistureLevel::Dry && !faults.water_level() && !faults.water_flow()
}

/// Convert pulses counted over a window to litres per hour
///
/// With the default K-factor of 7.5 pulses/s per L/min and a one second
/// window this is `pulses * 60 / 7.5`.
pub fn flow_lph(pulses: u32, window_ms: u32, k_factor_x10: u16) -> u16 {
    if window_ms == 0 || k_factor_x10 == 0 {
        return 0;
    }
    let lph = pulses as u64 * 600_000 / (window_ms as u64 * k_factor_x10 as u64);
    lph.min(u16::MAX as u64) as u16
}

/// Watches the flow while the pump runs
///
/// The first check after the pump starts waits for the settle time so the
/// line can fill before a low reading counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowMonitor {
    pump_on_since_ms: Option<u32>,
}

impl FlowMonitor {
    pub const fn new() -> Self {
        Self {
            pump_on_since_ms: None,
        }
    }

    /// Forget the pump start time (pump switched off)
    pub fn reset(&mut self) {
        self.pump_on_since_ms = None;
    }

    /// Check the flow; returns true if a flow fault should be latched
    pub fn check(
        &mut self,
        pump_on: bool,
        flow_lph: u16,
        now_ms: u32,
        config: &WateringConfig,
    ) -> bool {
        if !pump_on {
            self.reset();
            return false;
        }

        let since = *self.pump_on_since_ms.get_or_insert(now_ms);
        if now_ms.wrapping_sub(since) < config.flow_settle_ms {
            return false;
        }

        flow_lph < config.min_flow_lph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::FaultKind;

    #[test]
    fn test_water_need_only_when_dry() {
        let faults = FaultLatches::new();
        assert!(water_need(MoistureLevel::Dry, &faults));
        assert!(!water_need(MoistureLevel::Moist, &faults));
        assert!(!water_need(MoistureLevel::Wet, &faults));
    }

    #[test]
    fn test_water_need_blocked_by_faults() {
        let mut faults = FaultLatches::new();
        faults.set(FaultKind::WaterLevel, true);
        assert!(!water_need(MoistureLevel::Dry, &faults));

        let mut faults = FaultLatches::new();
        faults.set(FaultKind::WaterFlow, true);
        assert!(!water_need(MoistureLevel::Dry, &faults));

        // LED fault does not stop watering
        let mut faults = FaultLatches::new();
        faults.set(FaultKind::LedLight, true);
        assert!(water_need(MoistureLevel::Dry, &faults));
    }

    #[test]
    fn test_flow_conversion() {
        // 7.5 pulses/s is 1 L/min
        assert_eq!(flow_lph(15, 2000, 75), 60);
        assert_eq!(flow_lph(1, 1000, 75), 8);
        assert_eq!(flow_lph(0, 1000, 75), 0);
        assert_eq!(flow_lph(10, 0, 75), 0);
    }

    #[test]
    fn test_flow_threshold_after_settle() {
        let config = WateringConfig::default();
        let mut monitor = FlowMonitor::new();

        // Settling: low flow ignored
        assert!(!monitor.check(true, 0, 1000, &config));
        assert!(!monitor.check(true, 0, 1500, &config));
        // Settled
        assert!(monitor.check(true, 98, 2000, &config));
        assert!(!monitor.check(true, 99, 2100, &config));
    }

    #[test]
    fn test_flow_settle_restarts_with_pump() {
        let config = WateringConfig::default();
        let mut monitor = FlowMonitor::new();
        assert!(!monitor.check(true, 0, 0, &config));
        assert!(!monitor.check(false, 0, 5000, &config));
        assert!(!monitor.check(true, 0, 6000, &config));
        assert!(monitor.check(true, 0, 7000, &config));
    }
}

//! Hall-effect flow meter
//!
//! The sensor emits a pulse per fixed volume; pulses are counted by the
//! platform (pin interrupt or edge-wait task) and read out once per
//! measurement window.

use greenhouse_core::config::WateringConfig;
use greenhouse_core::control::flow_lph;

/// Source of counted flow sensor pulses
pub trait PulseSource {
    /// Return the pulses counted since the previous call and restart counting
    fn take_pulses(&mut self) -> u32;
}

/// Flow meter converting pulse counts to litres per hour
pub struct FlowMeter<S> {
    source: S,
    window_ms: u32,
    k_factor_x10: u16,
}

impl<S: PulseSource> FlowMeter<S> {
    pub fn new(source: S, config: &WateringConfig) -> Self {
        Self {
            source,
            window_ms: config.flow_window_ms,
            k_factor_x10: config.flow_k_factor_x10,
        }
    }

    /// Measurement window the caller should wait between reads (ms)
    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Read the flow over the window that just ended
    pub fn read_lph(&mut self) -> u16 {
        flow_lph(self.source.take_pulses(), self.window_ms, self.k_factor_x10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    impl PulseSource for Counter {
        fn take_pulses(&mut self) -> u32 {
            core::mem::take(&mut self.0)
        }
    }

    #[test]
    fn test_reads_and_restarts() {
        let mut meter = FlowMeter::new(Counter(15), &WateringConfig::default());
        // 15 pulses/s at 7.5 pulses/s per L/min = 2 L/min
        assert_eq!(meter.read_lph(), 120);
        assert_eq!(meter.read_lph(), 0);
    }

    #[test]
    fn test_threshold_pulse_count() {
        let config = WateringConfig::default();
        // 13 pulses in one second is just above the 99 L/h minimum
        assert_eq!(FlowMeter::new(Counter(13), &config).read_lph(), 104);
        assert_eq!(FlowMeter::new(Counter(12), &config).read_lph(), 96);
    }
}

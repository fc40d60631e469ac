//! LED lighting decisions

use crate::config::LightingConfig;

/// Check if a clock time (HHMM) lies inside the lighting window
pub fn in_window(time_hhmm: u16, config: &LightingConfig) -> bool {
    time_hhmm >= config.window_start_hhmm && time_hhmm < config.window_end_hhmm
}

/// Decide whether the LEDs should be on
///
/// LEDs run inside the time window whenever the measured UV index is
/// below the threshold.
pub fn light_need(time_hhmm: u16, uv_index: u16, config: &LightingConfig) -> bool {
    in_window(time_hhmm, config) && uv_index < config.uv_threshold
}

/// Check for an LED fault
///
/// The LEDs are on but the light reading is still below the threshold.
pub fn led_fault(led_on: bool, uv_index: u16, config: &LightingConfig) -> bool {
    led_on && uv_index < config.uv_threshold
}

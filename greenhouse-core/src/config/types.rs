//! Configuration type definitions
//!
//! These types represent the greenhouse configuration. The firmware embeds
//! a `greenhouse.toml` that is applied onto [`GreenhouseConfig::default`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest temperature limit the encoder can select (half degrees, 14 °C)
pub const TEMP_LIMIT_MIN_HALF_C: u8 = 28;

/// Highest temperature limit the encoder can select (half degrees, 40 °C)
pub const TEMP_LIMIT_MAX_HALF_C: u8 = 80;

/// Upper bound of the 10-bit moisture scale
pub const MOISTURE_SCALE_MAX: u16 = 1023;

/// Where the display goes when a flow fault has been acknowledged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FlowFaultPolicy {
    /// Resume on the service screen so the operator can inspect the latches
    #[default]
    ResumeToServiceMode,
    /// Resume straight onto the readout screen
    ResumeToReadout,
}

/// Button input configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonConfig {
    /// Minimum time between two accepted edges of the same button (ms)
    pub debounce_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { debounce_ms: 170 }
    }
}

/// Clock configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Duration of one clock second (ms)
    pub second_ms: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { second_ms: 1000 }
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Half period of the blinking cursor and clock separators (ms)
    pub blink_ms: u32,
    /// Seconds before the startup image advances on its own (0 = wait for MODE)
    pub splash_s: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            blink_ms: 500,
            splash_s: 0,
        }
    }
}

/// Sensor sampling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    /// Interval between sensor sweeps (ms)
    pub sample_interval_ms: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
        }
    }
}

/// Soil moisture classification thresholds (10-bit scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MoistureConfig {
    /// Readings at or below this value are dry
    pub dry_threshold: u16,
    /// Readings above this value are wet
    pub wet_threshold: u16,
}

impl Default for MoistureConfig {
    fn default() -> Self {
        Self {
            dry_threshold: 300,
            wet_threshold: 700,
        }
    }
}

/// Pump and flow sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WateringConfig {
    /// Minimum flow with the pump running (litres per hour)
    pub min_flow_lph: u16,
    /// Pump run time before the flow is checked (ms)
    pub flow_settle_ms: u32,
    /// Flow sensor K-factor: pulses per second at 1 L/min, times ten
    pub flow_k_factor_x10: u16,
    /// Length of one flow measurement window (ms)
    pub flow_window_ms: u32,
}

impl Default for WateringConfig {
    fn default() -> Self {
        Self {
            min_flow_lph: 99,
            flow_settle_ms: 1000,
            flow_k_factor_x10: 75,
            flow_window_ms: 1000,
        }
    }
}

/// LED lighting configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightingConfig {
    /// UV index below which the LEDs are needed
    pub uv_threshold: u16,
    /// First clock time (HHMM) the LEDs may run
    pub window_start_hhmm: u16,
    /// Clock time (HHMM) from which the LEDs stay off
    pub window_end_hhmm: u16,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            uv_threshold: 4,
            window_start_hhmm: 631,
            window_end_hhmm: 2332,
        }
    }
}

/// Temperature limit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TemperatureConfig {
    /// Initial limit in half degrees Celsius (60 = 30 °C)
    pub limit_half_c: u8,
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self { limit_half_c: 60 }
    }
}

/// Flow fault handling configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlowFaultConfig {
    /// Screen shown after an acknowledged flow fault
    pub resume_to: FlowFaultPolicy,
}

/// Complete greenhouse configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GreenhouseConfig {
    pub buttons: ButtonConfig,
    pub clock: ClockConfig,
    pub display: DisplayConfig,
    pub sensors: SensorConfig,
    pub moisture: MoistureConfig,
    pub watering: WateringConfig,
    pub lighting: LightingConfig,
    pub temperature: TemperatureConfig,
    pub flow_fault: FlowFaultConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period or interval is zero
    ZeroInterval,
    /// Dry threshold is not below the wet threshold, or above the scale
    MoistureThresholds,
    /// Flow K-factor is zero
    FlowKFactor,
    /// Lighting window is not a valid HHMM range
    LightingWindow,
    /// Temperature limit outside the selectable range
    TemperatureLimit,
}

impl GreenhouseConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every value is usable by the controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.second_ms == 0
            || self.display.blink_ms == 0
            || self.sensors.sample_interval_ms == 0
            || self.watering.flow_window_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }

        if self.moisture.dry_threshold >= self.moisture.wet_threshold
            || self.moisture.wet_threshold > MOISTURE_SCALE_MAX
        {
            return Err(ConfigError::MoistureThresholds);
        }

        if self.watering.flow_k_factor_x10 == 0 {
            return Err(ConfigError::FlowKFactor);
        }

        let start = self.lighting.window_start_hhmm;
        let end = self.lighting.window_end_hhmm;
        if !is_valid_hhmm(start) || !(is_valid_hhmm(end) || end == 2400) || start >= end {
            return Err(ConfigError::LightingWindow);
        }

        if !(TEMP_LIMIT_MIN_HALF_C..=TEMP_LIMIT_MAX_HALF_C).contains(&self.temperature.limit_half_c)
        {
            return Err(ConfigError::TemperatureLimit);
        }

        Ok(())
    }
}

/// Check that an HHMM integer names a real time of day
fn is_valid_hhmm(hhmm: u16) -> bool {
    hhmm / 100 < 24 && hhmm % 100 < 60
}

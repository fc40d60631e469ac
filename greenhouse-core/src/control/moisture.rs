//! Soil moisture evaluation
//!
//! Several probes are averaged with the highest and lowest reading
//! dropped, then the mean is classified against the dry/wet thresholds.

use crate::config::MoistureConfig;

/// Soil condition derived from the moisture mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoistureLevel {
    /// At or below the dry threshold, watering needed
    Dry,
    /// Between the thresholds
    Moist,
    /// Above the wet threshold
    Wet,
}

impl MoistureLevel {
    /// Classify a moisture mean (10-bit scale)
    pub fn classify(mean: u16, config: &MoistureConfig) -> Self {
        if mean <= config.dry_threshold {
            MoistureLevel::Dry
        } else if mean > config.wet_threshold {
            MoistureLevel::Wet
        } else {
            MoistureLevel::Moist
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoistureLevel::Dry => "DRY",
            MoistureLevel::Moist => "OK",
            MoistureLevel::Wet => "WET",
        }
    }
}

/// Mean of the readings with one minimum and one maximum removed
///
/// Returns `None` with fewer than three readings.
pub fn trimmed_mean(readings: &[u16]) -> Option<u16> {
    if readings.len() < 3 {
        return None;
    }

    let mut sum: u32 = 0;
    let mut min = u16::MAX;
    let mut max = u16::MIN;
    for &r in readings {
        sum += r as u32;
        min = min.min(r);
        max = max.max(r);
    }

    let kept = sum - min as u32 - max as u32;
    Some((kept / (readings.len() as u32 - 2)) as u16)
}

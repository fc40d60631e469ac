//! Simple TOML parser for greenhouse configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the greenhouse configuration. It does NOT support all of TOML.
//!
//! Supported features:
//! - Key = value pairs (string, integer)
//! - [section] headers
//! - Comments (# ...), also trailing a value
//!
//! NOT supported:
//! - Arrays and inline tables
//! - Multi-line strings
//! - Dotted keys

use super::types::{ConfigError, FlowFaultPolicy, GreenhouseConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not known in the current section
    UnknownKey,
    /// Value could not be parsed for its key
    InvalidValue,
    /// Line is neither a header nor a key = value pair
    InvalidLine,
    /// Parsed configuration failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Buttons,
    Clock,
    Display,
    Sensors,
    Moisture,
    Watering,
    Lighting,
    Temperature,
    FlowFault,
}

/// Parse TOML configuration onto the default GreenhouseConfig
///
/// Keys that are not present keep their default value. The result is
/// validated before it is returned.
pub fn parse_config(input: &str) -> Result<GreenhouseConfig, ParseError> {
    let mut config = GreenhouseConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing comment, ignoring '#' inside quoted strings
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse section header like "watering" or "flow_fault"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "buttons" => Ok(Section::Buttons),
        "clock" => Ok(Section::Clock),
        "display" => Ok(Section::Display),
        "sensors" => Ok(Section::Sensors),
        "moisture" => Ok(Section::Moisture),
        "watering" => Ok(Section::Watering),
        "lighting" => Ok(Section::Lighting),
        "temperature" => Ok(Section::Temperature),
        "flow_fault" => Ok(Section::FlowFault),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Split a `key = value` line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn parse_u32(value: &str) -> Result<u32, ParseError> {
    // Strip TOML digit separators
    let mut digits: heapless::String<12> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_u16(value: &str) -> Result<u16, ParseError> {
    u16::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_u8(value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

fn parse_policy(value: &str) -> Result<FlowFaultPolicy, ParseError> {
    match parse_string(value)? {
        "service_mode" | "resume_to_service_mode" => Ok(FlowFaultPolicy::ResumeToServiceMode),
        "readout" | "resume_to_readout" => Ok(FlowFaultPolicy::ResumeToReadout),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Apply one key/value pair to the section being parsed
fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut GreenhouseConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Buttons, "debounce_ms") => config.buttons.debounce_ms = parse_u32(value)?,

        (Section::Clock, "second_ms") => config.clock.second_ms = parse_u32(value)?,

        (Section::Display, "blink_ms") => config.display.blink_ms = parse_u32(value)?,
        (Section::Display, "splash_s") => config.display.splash_s = parse_u16(value)?,

        (Section::Sensors, "sample_interval_ms") => {
            config.sensors.sample_interval_ms = parse_u32(value)?
        }

        (Section::Moisture, "dry_threshold") => config.moisture.dry_threshold = parse_u16(value)?,
        (Section::Moisture, "wet_threshold") => config.moisture.wet_threshold = parse_u16(value)?,

        (Section::Watering, "min_flow_lph") => config.watering.min_flow_lph = parse_u16(value)?,
        (Section::Watering, "flow_settle_ms") => {
            config.watering.flow_settle_ms = parse_u32(value)?
        }
        (Section::Watering, "flow_k_factor_x10") => {
            config.watering.flow_k_factor_x10 = parse_u16(value)?
        }
        (Section::Watering, "flow_window_ms") => {
            config.watering.flow_window_ms = parse_u32(value)?
        }

        (Section::Lighting, "uv_threshold") => config.lighting.uv_threshold = parse_u16(value)?,
        (Section::Lighting, "window_start_hhmm") => {
            config.lighting.window_start_hhmm = parse_u16(value)?
        }
        (Section::Lighting, "window_end_hhmm") => {
            config.lighting.window_end_hhmm = parse_u16(value)?
        }

        (Section::Temperature, "limit_half_c") => {
            config.temperature.limit_half_c = parse_u8(value)?
        }

        (Section::FlowFault, "resume_to") => config.flow_fault.resume_to = parse_policy(value)?,

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

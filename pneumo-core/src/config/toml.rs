//! Minimal TOML parser for `machine.toml`
//!
//! Handles only the subset the machine configuration uses. It does NOT
//! support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Unknown keys are ignored so newer files still load; unknown sections are
//! rejected. The result is validated before it is returned.

use super::types::{ConfigError, MachineConfig, CONFIG_VERSION};
use crate::sensor::SensorModel;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Sensor part not supported
    InvalidSensor,
    /// Unsupported configuration version
    InvalidVersion,
    /// Values parsed but fail validation (e.g. inverted setpoints)
    InvalidConfig(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(err: ConfigError) -> Self {
        ParseError::InvalidConfig(err)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Sensor,
    Sampling,
    Control,
    Switches,
    Bus,
    Valves,
}

/// Parse TOML configuration into MachineConfig
pub fn parse_config(input: &str) -> Result<MachineConfig, ParseError> {
    let mut config = MachineConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let header = strip_comment(header).trim();
            let header = header.strip_suffix(']').ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "sensor" => Ok(Section::Sensor),
        "sampling" => Ok(Section::Sampling),
        "control" => Ok(Section::Control),
        "switches" => Ok(Section::Switches),
        "bus" => Ok(Section::Bus),
        "valves" => Ok(Section::Valves),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut MachineConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "version") => {
            let version: u8 = parse_int(value)?;
            if version != CONFIG_VERSION {
                return Err(ParseError::InvalidVersion);
            }
            config.version = version;
        }

        (Section::Sensor, "part") => {
            config.sensor.model =
                SensorModel::from_name(parse_string(value)?).ok_or(ParseError::InvalidSensor)?;
        }
        (Section::Sensor, "frame_len") => config.sensor.frame_len = parse_int(value)?,

        (Section::Sampling, "period_ms") => config.sampling.period_ms = parse_int(value)?,

        (Section::Control, "low_mpsi") => config.control.low_mpsi = parse_int(value)?,
        (Section::Control, "high_mpsi") => config.control.high_mpsi = parse_int(value)?,
        (Section::Control, "step_mpsi") => config.control.step_mpsi = parse_int(value)?,

        (Section::Switches, "debounce_ms") => config.switches.debounce_ms = parse_int(value)?,

        (Section::Bus, "frequency_hz") => config.bus.frequency_hz = parse_int(value)?,
        (Section::Bus, "init_timeout_polls") => {
            config.bus.init_timeout_polls = parse_int(value)?
        }

        (Section::Valves, "inflate_inverted") => config.valves.inflate_inverted = parse_bool(value)?,
        (Section::Valves, "deflate_inverted") => config.valves.deflate_inverted = parse_bool(value)?,

        // Unknown keys are ignored
        _ => {}
    }

    Ok(())
}

/// Drop a trailing `# comment` that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (pos, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &value[..pos],
            _ => {}
        }
    }
    value
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim()).trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Integers may use `_` separators (`100_000`)
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

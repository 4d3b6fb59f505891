//! Simple TOML parser for deck configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `deck.toml`. It does NOT support the full TOML language and never allocates.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - `[section]` headers
//! - Comments (`# ...`), including trailing comments
//! - Integer digit separators (`15_000`)
//!
//! NOT supported:
//! - Multi-line strings, arrays, inline tables
//! - Dotted keys and nested sections
//!
//! Keys that are absent keep their [`DeckConfig::default`] value.

use super::types::{DeckConfig, PinConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not recognised in its section
    UnknownKey,
    /// Line is not `key = value`, or the value has the wrong type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Pins,
    Motor,
    Pwm,
    Supervisor,
    Safety,
}

/// Parsed right-hand side of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Str(&'a str),
    Int(u32),
    Bool(bool),
}

/// Parse TOML configuration into DeckConfig
pub fn parse_config(input: &str) -> Result<DeckConfig, ParseError> {
    let mut config = DeckConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            let header = line
                .strip_prefix('[')
                .and_then(|l| l.strip_suffix(']'))
                .ok_or(ParseError::InvalidSection)?;
            section = parse_section_header(header)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

/// Drop a trailing `#` comment that is not inside a string
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

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "pins" => Ok(Section::Pins),
        "motor" => Ok(Section::Motor),
        "pwm" => Ok(Section::Pwm),
        "supervisor" => Ok(Section::Supervisor),
        "safety" => Ok(Section::Safety),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, Value<'_>)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, parse_value(value.trim())?))
}

fn parse_value(raw: &str) -> Option<Value<'_>> {
    if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        return Some(Value::Str(inner));
    }

    match raw {
        "true" => return Some(Value::Bool(true)),
        "false" => return Some(Value::Bool(false)),
        _ => {}
    }

    parse_int(raw).map(Value::Int)
}

/// Unsigned decimal with optional `_` separators
fn parse_int(raw: &str) -> Option<u32> {
    if raw.is_empty() || raw.starts_with('_') {
        return None;
    }

    let mut value: u32 = 0;
    for c in raw.chars() {
        if c == '_' {
            continue;
        }
        let digit = c.to_digit(10)?;
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    Some(value)
}

fn as_pin(value: Value<'_>) -> Result<PinConfig, ParseError> {
    match value {
        Value::Str(s) => PinConfig::parse(s).ok_or(ParseError::InvalidPin),
        _ => Err(ParseError::InvalidValue),
    }
}

fn as_u32(value: Value<'_>) -> Result<u32, ParseError> {
    match value {
        Value::Int(n) => Ok(n),
        _ => Err(ParseError::InvalidValue),
    }
}

fn as_u16(value: Value<'_>) -> Result<u16, ParseError> {
    u16::try_from(as_u32(value)?).map_err(|_| ParseError::InvalidValue)
}

fn as_bool(value: Value<'_>) -> Result<bool, ParseError> {
    match value {
        Value::Bool(b) => Ok(b),
        _ => Err(ParseError::InvalidValue),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: Value<'_>,
    config: &mut DeckConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Pins => {
            let pins = &mut config.pins;
            let slot = match key {
                "limited_close" => &mut pins.limited_close,
                "limited_open" => &mut pins.limited_open,
                "linked_power" => &mut pins.linked_power,
                "trigger_close" => &mut pins.trigger_close,
                "trigger_open" => &mut pins.trigger_open,
                "status_led" => &mut pins.status_led,
                "bling_led" => &mut pins.bling_led,
                "motor_pwm" => &mut pins.motor_pwm,
                "motor_in1" => &mut pins.motor_in1,
                "motor_in2" => &mut pins.motor_in2,
                _ => return Err(ParseError::UnknownKey),
            };
            *slot = as_pin(value)?;
        }
        Section::Motor => match key {
            "speed_open" => config.motor.speed_open = as_u16(value)?,
            "speed_close" => config.motor.speed_close = as_u16(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Pwm => match key {
            "frequency_hz" => config.pwm.frequency_hz = as_u32(value)?,
            "wrap" => config.pwm.wrap = as_u16(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Supervisor => match key {
            "enabled" => config.supervisor.enabled = as_bool(value)?,
            "interval_ms" => config.supervisor.interval_ms = as_u32(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Safety => match key {
            "stall_timeout_ms" => config.safety.stall_timeout_ms = as_u32(value)?,
            _ => return Err(ParseError::UnknownKey),
        },
        Section::Root => return Err(ParseError::UnknownKey),
    }

    Ok(())
}

//! Simple TOML parser for echo configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! the echo configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - Integer arrays: terminators = [13, 10]
//! - [section] headers
//! - Comments (# ...)
//!
//! Example:
//!
//! ```toml
//! [echo]
//! terminators = [13]
//! transform = "uppercase"
//! overflow = "drop"
//! echo_terminator = true
//!
//! [uart]
//! baudrate = 115200
//! data_bits = 8
//! parity = "none"
//! stop_bits = 1
//!
//! [clock]
//! sysclk_hz = 24500000
//! ```

use heapless::Vec;

use lineecho_hal::uart::{DataBits, Parity, StopBits};

use super::types::{
    EchoConfig, OverflowPolicy, TerminatorEcho, Terminators, Transform, MAX_TERMINATORS,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid or unknown section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Key not known in this section
    UnknownKey,
    /// Too many items in a list
    TooManyItems,
    /// Line is neither a header, a comment nor a key/value pair
    Malformed,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Echo,
    Uart,
    Clock,
}

/// Parse TOML text into an [`EchoConfig`]
///
/// Keys that are absent keep their default value.
pub fn parse_config(input: &str) -> Result<EchoConfig, ParseError> {
    let mut config = EchoConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::Malformed)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "echo" => Ok(Section::Echo),
        "uart" => Ok(Section::Uart),
        "clock" => Ok(Section::Clock),
        _ => Err(ParseError::InvalidSection),
    }
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = if let Some(hash_pos) = value.find('#') {
        // Make sure # is not inside a string
        let quote_count = value[..hash_pos].matches('"').count();
        if quote_count % 2 == 0 {
            value[..hash_pos].trim()
        } else {
            value
        }
    } else {
        value
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut EchoConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Echo, "terminators") => {
            let list = parse_byte_list(value)?;
            config.terminators =
                Terminators::from_slice(&list).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Echo, "transform") => {
            config.transform = match parse_string(value)? {
                "uppercase" => Transform::Uppercase,
                "none" => Transform::None,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        (Section::Echo, "overflow") => {
            config.overflow = match parse_string(value)? {
                "drop" => OverflowPolicy::Drop,
                "report" => OverflowPolicy::Report,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        (Section::Echo, "echo_terminator") => {
            config.terminator_echo = if parse_bool(value)? {
                TerminatorEcho::Echo
            } else {
                TerminatorEcho::Withhold
            };
        }
        (Section::Uart, "baudrate") => {
            let baudrate: u32 = parse_int(value)?;
            if baudrate == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.uart.baudrate = baudrate;
        }
        (Section::Uart, "data_bits") => {
            config.uart.data_bits =
                DataBits::from_count(parse_int(value)?).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Uart, "parity") => {
            config.uart.parity = match parse_string(value)? {
                "none" => Parity::None,
                "even" => Parity::Even,
                "odd" => Parity::Odd,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        (Section::Uart, "stop_bits") => {
            config.uart.stop_bits =
                StopBits::from_count(parse_int(value)?).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Clock, "sysclk_hz") => {
            config.sysclk_hz = parse_int(value)?;
        }
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse `[13, 10]` into bytes
fn parse_byte_list(value: &str) -> Result<Vec<u8, MAX_TERMINATORS>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut list = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Trailing comma
        if item.is_empty() {
            continue;
        }
        let byte: u8 = parse_int(item)?;
        list.push(byte).map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CR;

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), EchoConfig::default());
        assert_eq!(parse_config("# nothing\n\n").unwrap(), EchoConfig::default());
    }

    #[test]
    fn test_full_config() {
        let input = r#"
            [echo]
            terminators = [13, 10, 126]  # CR, LF, tilde
            transform = "none"
            overflow = "report"
            echo_terminator = false

            [uart]
            baudrate = 230400
            data_bits = 8
            parity = "even"
            stop_bits = 2

            [clock]
            sysclk_hz = 12000000
        "#;

        let config = parse_config(input).unwrap();
        assert_eq!(config.terminators.as_slice(), &[CR, b'\n', b'~']);
        assert_eq!(config.transform, Transform::None);
        assert_eq!(config.overflow, OverflowPolicy::Report);
        assert_eq!(config.terminator_echo, TerminatorEcho::Withhold);
        assert_eq!(config.uart.baudrate, 230_400);
        assert_eq!(config.uart.parity, Parity::Even);
        assert_eq!(config.uart.stop_bits, StopBits::Two);
        assert_eq!(config.sysclk_hz, 12_000_000);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[echo]\ncapacity = 128"),
            Err(ParseError::UnknownKey)
        );
        // Keys outside a section are not accepted either
        assert_eq!(parse_config("baudrate = 9600"), Err(ParseError::UnknownKey));
    }

    #[test]
    fn test_invalid_section() {
        assert_eq!(parse_config("[pca]"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[uart]\nbaudrate = fast"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[uart]\nbaudrate = 0"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[uart]\ndata_bits = 5"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[echo]\nterminators = [300]"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[echo]\nterminators = []"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_too_many_terminators() {
        assert_eq!(
            parse_config("[echo]\nterminators = [1, 2, 3, 4, 5]"),
            Err(ParseError::TooManyItems)
        );
    }

    #[test]
    fn test_malformed_line() {
        assert_eq!(parse_config("[echo]\nterminators"), Err(ParseError::Malformed));
    }

    #[test]
    fn test_parse_key_value_strips_comment() {
        assert_eq!(
            parse_key_value("overflow = \"drop\" # legacy"),
            Some(("overflow", "\"drop\""))
        );
        assert_eq!(parse_key_value("= 3"), None);
    }
}

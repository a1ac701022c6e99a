//! Configuration type definitions
//!
//! Everything the echo needs to know about its line: which bytes end a
//! line, how bytes are transformed on the way back out, what happens on
//! overflow, and the serial framing.

use lineecho_hal::uart::UartConfig;

/// Carriage return, the line terminator of the demos
pub const CR: u8 = 0x0D;

/// Maximum number of distinct terminator bytes
pub const MAX_TERMINATORS: usize = 4;

/// System clock the demo boards run at (Hz)
pub const DEFAULT_SYSCLK_HZ: u32 = 24_500_000;

/// Set of bytes that end a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Terminators {
    bytes: [u8; MAX_TERMINATORS],
    len: u8,
}

impl Terminators {
    /// A single terminator byte
    pub const fn single(byte: u8) -> Self {
        Self {
            bytes: [byte, 0, 0, 0],
            len: 1,
        }
    }

    /// Build from a list of bytes
    ///
    /// Returns `None` if the list is empty or longer than
    /// [`MAX_TERMINATORS`].
    pub fn from_slice(list: &[u8]) -> Option<Self> {
        if list.is_empty() || list.len() > MAX_TERMINATORS {
            return None;
        }
        let mut bytes = [0u8; MAX_TERMINATORS];
        bytes[..list.len()].copy_from_slice(list);
        Some(Self {
            bytes,
            len: list.len() as u8,
        })
    }

    /// Check whether a byte ends a line
    pub fn contains(&self, byte: u8) -> bool {
        self.as_slice().contains(&byte)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl Default for Terminators {
    fn default() -> Self {
        Self::single(CR)
    }
}

/// Transformation applied to each byte as it is echoed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transform {
    /// ASCII `a`..=`z` become `A`..=`Z`, everything else passes through
    #[default]
    Uppercase,
    /// Bytes are echoed unchanged
    None,
}

impl Transform {
    /// Apply the transform to one byte
    pub const fn apply(self, byte: u8) -> u8 {
        match self {
            Transform::Uppercase => {
                if byte >= b'a' && byte <= b'z' {
                    byte - 32
                } else {
                    byte
                }
            }
            Transform::None => byte,
        }
    }
}

/// What to do with bytes that arrive while the buffer is full
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverflowPolicy {
    /// Discard silently (legacy behaviour)
    #[default]
    Drop,
    /// Discard and tell the caller, so it can push back on the sender
    Report,
}

/// Whether the final byte of a line is sent back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminatorEcho {
    /// Every buffered byte, terminator included, is echoed
    #[default]
    Echo,
    /// The last buffered byte is discarded instead of sent
    Withhold,
}

/// Complete echo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoConfig {
    /// Bytes that end a line
    pub terminators: Terminators,
    /// Per-byte transform on output
    pub transform: Transform,
    /// Behaviour on a full buffer
    pub overflow: OverflowPolicy,
    /// Handling of the final byte
    pub terminator_echo: TerminatorEcho,
    /// Serial line settings
    pub uart: UartConfig,
    /// System clock the baud rate was derived for (Hz)
    pub sysclk_hz: u32,
}

impl EchoConfig {
    /// Legacy demo configuration: CR-terminated, upper-casing, silent drop
    pub const fn new() -> Self {
        Self {
            terminators: Terminators::single(CR),
            transform: Transform::Uppercase,
            overflow: OverflowPolicy::Drop,
            terminator_echo: TerminatorEcho::Echo,
            uart: UartConfig::new(lineecho_hal::uart::DEFAULT_BAUDRATE),
            sysclk_hz: DEFAULT_SYSCLK_HZ,
        }
    }
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_transform() {
        assert_eq!(Transform::Uppercase.apply(b'a'), b'A');
        assert_eq!(Transform::Uppercase.apply(b'z'), b'Z');
        assert_eq!(Transform::Uppercase.apply(b'A'), b'A');
        assert_eq!(Transform::Uppercase.apply(b'{'), b'{');
        assert_eq!(Transform::Uppercase.apply(b'`'), b'`');
        assert_eq!(Transform::Uppercase.apply(CR), CR);
        // Latin-1 lower case is not folded
        assert_eq!(Transform::Uppercase.apply(0xE9), 0xE9);
        assert_eq!(Transform::None.apply(b'q'), b'q');
    }

    #[test]
    fn test_terminators() {
        let t = Terminators::default();
        assert!(t.contains(CR));
        assert!(!t.contains(b'\n'));

        let t = Terminators::from_slice(b"\r\n~").unwrap();
        assert!(t.contains(b'~'));
        assert_eq!(t.as_slice(), b"\r\n~");

        assert!(Terminators::from_slice(&[]).is_none());
        assert!(Terminators::from_slice(b"12345").is_none());
    }

    #[test]
    fn test_default_config() {
        let config = EchoConfig::default();
        assert_eq!(config, EchoConfig::new());
        assert_eq!(config.overflow, OverflowPolicy::Drop);
        assert_eq!(config.terminator_echo, TerminatorEcho::Echo);
        assert!(config.uart.is_8n1());
    }
}

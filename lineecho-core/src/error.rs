//! Error types

/// Errors surfaced by the echo components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoError {
    /// Buffer full, the byte was discarded
    Overflow,
    /// The underlying UART reported an error
    Uart,
}

//! Echo counters
//!
//! The legacy echo drops overflowing bytes without any signal to the
//! sender. These counters make that loss observable without changing
//! what goes out on the wire.

/// Running totals for one echo instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoStats {
    /// Bytes taken from the receiver
    pub received: u32,
    /// Received bytes that did not fit in the buffer
    pub dropped: u32,
    /// Bytes written to the transmitter
    pub transmitted: u32,
    /// Completed receive/transmit cycles
    pub lines: u32,
}

impl EchoStats {
    pub const fn new() -> Self {
        Self {
            received: 0,
            dropped: 0,
            transmitted: 0,
            lines: 0,
        }
    }

    /// Check whether any input has been lost
    pub fn has_overflowed(&self) -> bool {
        self.dropped > 0
    }

    pub(crate) fn record_rx(&mut self, stored: bool) {
        self.received = self.received.saturating_add(1);
        if !stored {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    pub(crate) fn record_tx(&mut self) {
        self.transmitted = self.transmitted.saturating_add(1);
    }

    pub(crate) fn record_line(&mut self) {
        self.lines = self.lines.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = EchoStats::new();
        stats.record_rx(true);
        stats.record_rx(false);
        stats.record_tx();
        stats.record_line();

        assert_eq!(stats.received, 2);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.transmitted, 1);
        assert_eq!(stats.lines, 1);
        assert!(stats.has_overflowed());
    }

    #[test]
    fn test_saturates() {
        let mut stats = EchoStats {
            received: u32::MAX,
            ..EchoStats::new()
        };
        stats.record_rx(true);
        assert_eq!(stats.received, u32::MAX);
    }
}

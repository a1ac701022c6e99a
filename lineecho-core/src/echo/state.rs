//! Echo states and handler outcomes

/// Observable state of a [`LineEcho`](super::LineEcho)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoState {
    /// Nothing buffered, no transfer in progress
    IdleEmpty,
    /// Some bytes buffered, waiting for a terminator
    Filling,
    /// Buffer at capacity; further input is discarded
    Full,
    /// A transfer has been armed and the buffer is being sent
    Draining,
}

impl EchoState {
    /// Check whether a transfer is in progress
    pub fn is_draining(&self) -> bool {
        matches!(self, EchoState::Draining)
    }
}

/// Result of a receive-complete event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxOutcome {
    /// Byte appended to the line
    Stored,
    /// Buffer full, byte discarded without notice
    Discarded,
    /// Buffer full, byte discarded and reported
    Overflow,
    /// A terminator arrived and the line is ready to be sent
    LineComplete,
}

/// Result of a transmit-complete event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxOutcome {
    /// This byte should be loaded into the transmitter
    Send(u8),
    /// The transfer finished; the echo is ready for the next line
    Finished,
    /// No transfer was armed, the event is ignored
    Idle,
}

/// What one pass of the combined handler did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Serviced {
    /// Receive event handled, if one was pending
    pub rx: Option<RxOutcome>,
    /// Transmit event handled, if one was pending
    pub tx: Option<TxOutcome>,
}

impl Serviced {
    /// Check whether the handler found nothing to do
    pub fn is_empty(&self) -> bool {
        self.rx.is_none() && self.tx.is_none()
    }

    /// Check whether a line became ready during this pass
    pub fn line_complete(&self) -> bool {
        self.rx == Some(RxOutcome::LineComplete)
    }

    /// Check whether a transfer finished during this pass
    pub fn transfer_finished(&self) -> bool {
        self.tx == Some(TxOutcome::Finished)
    }
}

//! Flag-level serial port access
//!
//! Models a UART the way an interrupt handler sees it: one "receive
//! complete" flag, one "transmit complete" flag, a data register in each
//! direction, and a way for the foreground to request the first transmit
//! interrupt of a transfer. Both flags may be pending at the same time
//! and raise the same interrupt.

/// Interrupt-level view of a UART peripheral
pub trait SerialPort {
    /// A received byte is waiting in the data register
    fn rx_pending(&self) -> bool;

    /// The transmitter is ready for the next byte
    fn tx_pending(&self) -> bool;

    /// Acknowledge the receive condition
    fn clear_rx(&mut self);

    /// Acknowledge the transmit condition
    fn clear_tx(&mut self);

    /// Read the received byte
    fn read_data(&mut self) -> u8;

    /// Load a byte into the transmitter
    fn write_data(&mut self, byte: u8);

    /// Raise the transmit condition from software to start a transfer
    fn request_tx(&mut self);

    /// The current transfer has no more bytes to send
    ///
    /// Ports whose transmit condition is emulated in software use this
    /// to stop reporting [`SerialPort::tx_pending`].
    fn tx_complete(&mut self) {}
}

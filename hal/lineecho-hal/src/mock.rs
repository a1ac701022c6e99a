//! Host-side serial peripheral model
//!
//! Behaves like a classic 8051-style UART: injecting a byte latches it
//! into the receive register and raises RI, writing the transmit register
//! completes instantly and raises TI. Everything sent is recorded.

use heapless::{Deque, Vec};

use crate::serial::SerialPort;
use crate::uart::{UartRx, UartTx};

/// Depth of the simulated receive line
pub const MOCK_RX_DEPTH: usize = 256;

/// Capacity of the transmit log
pub const MOCK_TX_LOG: usize = 512;

/// Errors from the mock blocking interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockError {
    /// No more input bytes were queued
    Exhausted,
    /// Transmit log is full
    LogFull,
}

/// Simulated UART
#[derive(Debug, Default)]
pub struct MockSerial {
    rx_line: Deque<u8, MOCK_RX_DEPTH>,
    sent: Vec<u8, MOCK_TX_LOG>,
    ri: bool,
    ti: bool,
    transfers: u32,
}

impl MockSerial {
    /// Create an idle port
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes arriving on the receive pin
    ///
    /// Returns how many bytes were queued before the line filled up.
    pub fn inject(&mut self, bytes: &[u8]) -> usize {
        let mut queued = 0;
        for &byte in bytes {
            if self.rx_line.push_back(byte).is_err() {
                break;
            }
            queued += 1;
        }
        if queued > 0 {
            self.ri = true;
        }
        queued
    }

    /// Bytes written to the transmitter so far
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// Forget everything sent so far
    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    /// Bytes still waiting on the receive line
    pub fn rx_backlog(&self) -> usize {
        self.rx_line.len()
    }

    /// Number of transfers reported complete
    pub fn transfers(&self) -> u32 {
        self.transfers
    }

    /// Raise or drop the transmit flag directly
    pub fn set_ti(&mut self, ti: bool) {
        self.ti = ti;
    }
}

impl SerialPort for MockSerial {
    fn rx_pending(&self) -> bool {
        self.ri
    }

    fn tx_pending(&self) -> bool {
        self.ti
    }

    fn clear_rx(&mut self) {
        self.ri = false;
    }

    fn clear_tx(&mut self) {
        self.ti = false;
    }

    fn read_data(&mut self) -> u8 {
        let byte = self.rx_line.pop_front().unwrap_or(0);
        // Next byte on the line latches straight into the register
        if !self.rx_line.is_empty() {
            self.ri = true;
        }
        byte
    }

    fn write_data(&mut self, byte: u8) {
        assert!(self.sent.push(byte).is_ok(), "transmit log full");
        self.ti = true;
    }

    fn request_tx(&mut self) {
        self.ti = true;
    }

    fn tx_complete(&mut self) {
        self.transfers = self.transfers.saturating_add(1);
    }
}

impl UartRx for MockSerial {
    type Error = MockError;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        for slot in buf.iter_mut() {
            *slot = self.rx_line.pop_front().ok_or(MockError::Exhausted)?;
        }
        self.ri = !self.rx_line.is_empty();
        Ok(buf.len())
    }
}

impl UartTx for MockSerial {
    type Error = MockError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.sent
            .extend_from_slice(data)
            .map_err(|_| MockError::LogFull)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

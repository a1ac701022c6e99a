//! Polled echo over a blocking UART
//!
//! Same line semantics as the interrupt-driven echo, driven from a plain
//! loop: read a byte, and once a line is complete write it back out.

use lineecho_hal::uart::{UartRx, UartTx};

use crate::config::EchoConfig;
use crate::echo::{LineEcho, RxOutcome, TxOutcome};
use crate::error::EchoError;

/// Bytes written per `write_blocking` call while draining
const TX_CHUNK: usize = 16;

/// Blocking line echo
pub struct PolledEcho<U, const N: usize> {
    uart: U,
    echo: LineEcho<N>,
}

impl<U: UartRx + UartTx, const N: usize> PolledEcho<U, N> {
    pub fn new(uart: U, config: EchoConfig) -> Self {
        Self {
            uart,
            echo: LineEcho::new(config),
        }
    }

    /// Read one byte and echo the line if it is complete
    ///
    /// Returns the number of bytes written when a line went out.
    pub fn step(&mut self) -> Result<Option<usize>, EchoError> {
        let byte = self.uart.read_byte().map_err(|_| EchoError::Uart)?;

        if self.echo.on_rx(byte) == RxOutcome::Overflow {
            return Err(EchoError::Overflow);
        }

        if !self.echo.poll_arm() {
            return Ok(None);
        }

        self.drain().map(Some)
    }

    /// Echo forever
    ///
    /// Overflow is not fatal; only a UART error ends the loop.
    pub fn run(&mut self) -> EchoError {
        loop {
            match self.step() {
                Err(EchoError::Uart) => return EchoError::Uart,
                _ => continue,
            }
        }
    }

    fn drain(&mut self) -> Result<usize, EchoError> {
        let mut chunk = [0u8; TX_CHUNK];
        let mut filled = 0;
        let mut total = 0;

        while let TxOutcome::Send(byte) = self.echo.on_tx_ready() {
            chunk[filled] = byte;
            filled += 1;
            if filled == TX_CHUNK {
                self.write(&chunk)?;
                total += filled;
                filled = 0;
            }
        }

        if filled > 0 {
            self.write(&chunk[..filled])?;
            total += filled;
        }
        self.uart.flush().map_err(|_| EchoError::Uart)?;

        Ok(total)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), EchoError> {
        self.uart.write_blocking(data).map_err(|_| EchoError::Uart)
    }

    pub fn echo(&self) -> &LineEcho<N> {
        &self.echo
    }

    /// Release the UART
    pub fn into_inner(self) -> U {
        self.uart
    }
}

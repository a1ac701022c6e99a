//! Interrupt-safe echo instance
//!
//! Wraps a [`LineEcho`] in a critical-section mutex so it can live in a
//! `static` and be touched from both the interrupt handler and the
//! foreground. Every access runs inside `critical_section::with`, so the
//! handler and the arm write can never interleave.

use core::cell::RefCell;

use critical_section::Mutex;
use lineecho_hal::serial::SerialPort;

use crate::config::EchoConfig;
use crate::echo::{EchoState, LineEcho, RxOutcome, Serviced, TxOutcome};
use crate::stats::EchoStats;

/// [`LineEcho`] shared between interrupt and foreground context
pub struct SharedEcho<const N: usize> {
    inner: Mutex<RefCell<LineEcho<N>>>,
}

impl<const N: usize> SharedEcho<N> {
    /// Create an idle instance, usable in a `static`
    pub const fn new(config: EchoConfig) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(LineEcho::new(config))),
        }
    }

    /// Run `f` with exclusive access to the echo
    pub fn with<R>(&self, f: impl FnOnce(&mut LineEcho<N>) -> R) -> R {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Replace the configuration and return to the initial state
    pub fn configure(&self, config: EchoConfig) {
        self.with(|echo| {
            echo.set_config(config);
            echo.reset();
        });
    }

    /// Receive-complete event
    pub fn on_rx(&self, byte: u8) -> RxOutcome {
        self.with(|echo| echo.on_rx(byte))
    }

    /// Transmit-complete event
    pub fn on_tx_ready(&self) -> TxOutcome {
        self.with(|echo| echo.on_tx_ready())
    }

    /// Combined interrupt handler, see [`LineEcho::service`]
    pub fn service<P: SerialPort>(&self, port: &mut P) -> Serviced {
        self.with(|echo| echo.service(port))
    }

    /// Foreground arm check, see [`LineEcho::poll_arm`]
    pub fn poll_arm(&self) -> bool {
        self.with(|echo| echo.poll_arm())
    }

    /// Foreground arm and transmit request, see [`LineEcho::arm`]
    pub fn arm<P: SerialPort>(&self, port: &mut P) -> bool {
        self.with(|echo| echo.arm(port))
    }

    pub fn state(&self) -> EchoState {
        self.with(|echo| echo.state())
    }

    pub fn stats(&self) -> EchoStats {
        self.with(|echo| echo.stats())
    }

    /// Check for an empty buffer with no transfer in progress
    pub fn is_idle(&self) -> bool {
        self.state() == EchoState::IdleEmpty
    }
}

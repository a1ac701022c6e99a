//! Line echo engine
//!
//! One instance holds all state shared between the receive handler, the
//! transmit handler and the foreground loop.

use lineecho_hal::serial::SerialPort;

use super::state::{EchoState, RxOutcome, Serviced, TxOutcome};
use crate::buffer::LineBuffer;
use crate::config::{EchoConfig, OverflowPolicy, TerminatorEcho};
use crate::stats::EchoStats;

/// Buffered serial echo
///
/// Lifecycle: created once before interrupts are enabled with an empty
/// buffer and the transmitter marked ready.
#[derive(Debug, Clone)]
pub struct LineEcho<const N: usize> {
    buffer: LineBuffer<N>,
    /// A new transfer may be armed
    tx_ready: bool,
    /// Most recently received byte, stored or not
    last_rx: Option<u8>,
    config: EchoConfig,
    stats: EchoStats,
}

impl<const N: usize> Default for LineEcho<N> {
    fn default() -> Self {
        Self::new(EchoConfig::new())
    }
}

impl<const N: usize> LineEcho<N> {
    /// Create an idle echo
    pub const fn new(config: EchoConfig) -> Self {
        Self {
            buffer: LineBuffer::new(),
            tx_ready: true,
            last_rx: None,
            config,
            stats: EchoStats::new(),
        }
    }

    /// Receive-complete event
    ///
    /// The byte is always remembered as the last received byte, even when
    /// there is no room to store it.
    pub fn on_rx(&mut self, byte: u8) -> RxOutcome {
        self.last_rx = Some(byte);
        let stored = self.buffer.push(byte);
        self.stats.record_rx(stored);

        if self.line_armable() && self.config.terminators.contains(byte) {
            return RxOutcome::LineComplete;
        }

        match (stored, self.config.overflow) {
            (true, _) => RxOutcome::Stored,
            (false, OverflowPolicy::Drop) => RxOutcome::Discarded,
            (false, OverflowPolicy::Report) => RxOutcome::Overflow,
        }
    }

    /// Transmit-complete event
    pub fn on_tx_ready(&mut self) -> TxOutcome {
        if self.tx_ready {
            return TxOutcome::Idle;
        }

        let remaining = self.buffer.len();
        let withhold_last =
            self.config.terminator_echo == TerminatorEcho::Withhold && remaining == 1;

        if withhold_last {
            self.buffer.clear();
        }

        match self.buffer.pop() {
            Some(byte) => {
                self.stats.record_tx();
                TxOutcome::Send(self.config.transform.apply(byte))
            }
            None => {
                self.buffer.clear();
                self.tx_ready = true;
                self.stats.record_line();
                TxOutcome::Finished
            }
        }
    }

    /// Foreground check: arm a transfer once a complete line is buffered
    ///
    /// Returns `true` if the caller must now raise the transmit condition.
    pub fn poll_arm(&mut self) -> bool {
        if self.line_armable() {
            self.tx_ready = false;
            true
        } else {
            false
        }
    }

    /// [`poll_arm`](Self::poll_arm) and raise the transmit condition on `port`
    pub fn arm<P: SerialPort>(&mut self, port: &mut P) -> bool {
        let armed = self.poll_arm();
        if armed {
            port.request_tx();
        }
        armed
    }

    /// Combined interrupt handler
    ///
    /// Services a pending receive first, then a pending transmit. Both are
    /// handled in the same pass when both are pending.
    pub fn service<P: SerialPort>(&mut self, port: &mut P) -> Serviced {
        let mut serviced = Serviced::default();

        if port.rx_pending() {
            port.clear_rx();
            let byte = port.read_data();
            serviced.rx = Some(self.on_rx(byte));
        }

        if port.tx_pending() {
            port.clear_tx();
            let outcome = self.on_tx_ready();
            match outcome {
                TxOutcome::Send(byte) => port.write_data(byte),
                TxOutcome::Finished => port.tx_complete(),
                TxOutcome::Idle => {}
            }
            serviced.tx = Some(outcome);
        }

        serviced
    }

    fn line_armable(&self) -> bool {
        self.tx_ready
            && !self.buffer.is_empty()
            && self
                .last_rx
                .is_some_and(|byte| self.config.terminators.contains(byte))
    }

    /// Current state
    pub fn state(&self) -> EchoState {
        if !self.tx_ready {
            EchoState::Draining
        } else if self.buffer.is_empty() {
            EchoState::IdleEmpty
        } else if self.buffer.is_full() {
            EchoState::Full
        } else {
            EchoState::Filling
        }
    }

    /// Bytes currently buffered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Check whether another received byte would be stored
    pub fn accepts_input(&self) -> bool {
        !self.buffer.is_full()
    }

    /// Check whether a new transfer may be armed
    pub fn is_tx_ready(&self) -> bool {
        self.tx_ready
    }

    pub fn last_rx(&self) -> Option<u8> {
        self.last_rx
    }

    pub fn buffer(&self) -> &LineBuffer<N> {
        &self.buffer
    }

    pub fn stats(&self) -> EchoStats {
        self.stats
    }

    pub fn config(&self) -> &EchoConfig {
        &self.config
    }

    /// Replace the configuration
    ///
    /// Meant for start-up, before interrupts are enabled.
    pub fn set_config(&mut self, config: EchoConfig) {
        self.config = config;
    }

    /// Return to the initial state, keeping configuration and counters
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.tx_ready = true;
        self.last_rx = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Terminators, Transform, CR};
    use lineecho_hal::mock::MockSerial;

    /// Run the handler until neither flag is pending
    fn pump<const N: usize>(echo: &mut LineEcho<N>, port: &mut MockSerial) {
        while !echo.service(port).is_empty() {}
    }

    /// Type bytes, let the foreground arm, drain the line
    fn type_line<const N: usize>(echo: &mut LineEcho<N>, port: &mut MockSerial, input: &[u8]) {
        for &byte in input {
            port.inject(&[byte]);
            pump(echo, port);
            if echo.arm(port) {
                pump(echo, port);
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let echo = LineEcho::<64>::default();
        assert_eq!(echo.state(), EchoState::IdleEmpty);
        assert!(echo.is_tx_ready());
        assert_eq!(echo.len(), 0);
        assert_eq!(echo.last_rx(), None);
    }

    #[test]
    fn test_hi_scenario() {
        let mut echo = LineEcho::<64>::default();

        assert_eq!(echo.on_rx(b'H'), RxOutcome::Stored);
        assert_eq!(echo.on_rx(b'i'), RxOutcome::Stored);
        assert_eq!(echo.on_rx(CR), RxOutcome::LineComplete);
        assert_eq!(echo.len(), 3);

        assert!(echo.poll_arm());
        assert_eq!(echo.state(), EchoState::Draining);
        // Already armed
        assert!(!echo.poll_arm());

        assert_eq!(echo.on_tx_ready(), TxOutcome::Send(b'H'));
        assert_eq!(echo.on_tx_ready(), TxOutcome::Send(b'I'));
        assert_eq!(echo.on_tx_ready(), TxOutcome::Send(CR));
        assert_eq!(echo.on_tx_ready(), TxOutcome::Finished);

        assert!(echo.is_tx_ready());
        assert_eq!(echo.len(), 0);
        assert_eq!(echo.state(), EchoState::IdleEmpty);
        assert_eq!(echo.stats().lines, 1);
    }

    #[test]
    fn test_no_arm_without_terminator() {
        let mut echo = LineEcho::<64>::default();
        echo.on_rx(b'a');
        assert!(!echo.poll_arm());
        assert_eq!(echo.state(), EchoState::Filling);
    }

    #[test]
    fn test_tx_event_without_transfer_is_ignored() {
        let mut echo = LineEcho::<64>::default();
        echo.on_rx(b'a');
        assert_eq!(echo.on_tx_ready(), TxOutcome::Idle);
        assert_eq!(echo.len(), 1);
    }

    #[test]
    fn test_overflow_is_silent_by_default() {
        let mut echo = LineEcho::<4>::default();
        for &byte in b"abcd" {
            assert_eq!(echo.on_rx(byte), RxOutcome::Stored);
        }
        assert_eq!(echo.state(), EchoState::Full);
        assert_eq!(echo.on_rx(b'e'), RxOutcome::Discarded);
        assert_eq!(echo.len(), 4);

        // Terminator is dropped too, but still completes the line
        assert_eq!(echo.on_rx(CR), RxOutcome::LineComplete);
        assert_eq!(echo.len(), 4);
        assert_eq!(echo.stats().dropped, 2);
    }

    #[test]
    fn test_overflow_report_policy() {
        let mut config = EchoConfig::new();
        config.overflow = OverflowPolicy::Report;
        let mut echo = LineEcho::<2>::new(config);

        echo.on_rx(b'a');
        echo.on_rx(b'b');
        assert_eq!(echo.on_rx(b'c'), RxOutcome::Overflow);
        assert_eq!(echo.on_rx(CR), RxOutcome::LineComplete);
    }

    #[test]
    fn test_withhold_last_byte() {
        let mut config = EchoConfig::new();
        config.terminator_echo = TerminatorEcho::Withhold;
        let mut echo = LineEcho::<64>::new(config);

        echo.on_rx(b'o');
        echo.on_rx(b'k');
        echo.on_rx(CR);
        assert!(echo.poll_arm());

        assert_eq!(echo.on_tx_ready(), TxOutcome::Send(b'O'));
        assert_eq!(echo.on_tx_ready(), TxOutcome::Send(b'K'));
        assert_eq!(echo.on_tx_ready(), TxOutcome::Finished);
        assert_eq!(echo.len(), 0);
        assert!(echo.is_tx_ready());
    }

    #[test]
    fn test_service_through_port() {
        let mut echo = LineEcho::<64>::default();
        let mut port = MockSerial::new();

        type_line(&mut echo, &mut port, b"Hi\r");

        assert_eq!(port.sent(), b"HI\r");
        assert_eq!(port.transfers(), 1);
        assert!(echo.is_tx_ready());
        assert_eq!(echo.len(), 0);
    }

    #[test]
    fn test_rx_and_tx_in_same_pass() {
        let mut echo = LineEcho::<64>::default();
        let mut port = MockSerial::new();

        port.inject(b"a\r");
        pump(&mut echo, &mut port);
        assert!(echo.arm(&mut port));

        // Next byte arrives while the first transmit is pending
        port.inject(b"b");
        let pass = echo.service(&mut port);
        assert_eq!(pass.rx, Some(RxOutcome::Stored));
        assert_eq!(pass.tx, Some(TxOutcome::Send(b'A')));

        pump(&mut echo, &mut port);
        // Bytes received during a drain go out with the same transfer
        assert_eq!(port.sent(), b"A\rB");
        assert!(echo.is_tx_ready());
    }

    #[test]
    fn test_second_line_after_cycle() {
        let mut echo = LineEcho::<64>::default();
        let mut port = MockSerial::new();

        type_line(&mut echo, &mut port, b"one\r");
        type_line(&mut echo, &mut port, b"two\r");

        assert_eq!(port.sent(), b"ONE\rTWO\r");
        // Each finished transfer returns the buffer to its initial state
        assert_eq!(echo.buffer().read_index(), 0);
        assert_eq!(echo.buffer().write_index(), 0);
        assert_eq!(echo.stats().lines, 2);
    }

    #[test]
    fn test_accepts_input_while_draining() {
        let mut echo = LineEcho::<4>::default();
        for &byte in b"abc\r" {
            echo.on_rx(byte);
        }
        assert!(echo.poll_arm());
        assert_eq!(echo.on_tx_ready(), TxOutcome::Send(b'A'));

        assert!(echo.accepts_input());
        assert_eq!(echo.on_rx(b'x'), RxOutcome::Stored);
        assert_eq!(echo.len(), 4);
        assert_eq!(echo.state(), EchoState::Draining);
        assert!(!echo.accepts_input());
        assert_eq!(echo.on_rx(b'y'), RxOutcome::Discarded);
    }

    #[test]
    fn test_spurious_tx_flag_at_startup() {
        let mut echo = LineEcho::<64>::default();
        let mut port = MockSerial::new();

        // Transmit flag already raised when the handler is first enabled
        port.set_ti(true);
        port.inject(b"ab");
        assert_eq!(port.rx_backlog(), 2);

        let pass = echo.service(&mut port);
        assert_eq!(pass.rx, Some(RxOutcome::Stored));
        assert_eq!(pass.tx, Some(TxOutcome::Idle));
        assert_eq!(port.rx_backlog(), 1);

        pump(&mut echo, &mut port);
        assert!(port.sent().is_empty());
        assert_eq!(echo.len(), 2);
        assert!(echo.is_tx_ready());
    }

    #[test]
    fn test_custom_terminators_and_transform() {
        let mut config = EchoConfig::new();
        config.terminators = Terminators::from_slice(b"\n~").unwrap();
        config.transform = Transform::None;
        let mut echo = LineEcho::<64>::new(config);
        let mut port = MockSerial::new();

        type_line(&mut echo, &mut port, b"ab\rc~");
        assert_eq!(port.sent(), b"ab\rc~");
    }

    #[test]
    fn test_reset_keeps_counters() {
        let mut echo = LineEcho::<8>::default();
        echo.on_rx(b'x');
        echo.on_rx(CR);
        echo.poll_arm();
        echo.reset();

        assert_eq!(echo.state(), EchoState::IdleEmpty);
        assert_eq!(echo.last_rx(), None);
        assert_eq!(echo.stats().received, 2);
    }
}

//! PL011 register-level serial port
//!
//! Exposes an RP2040 UART through [`SerialPort`] so the combined receive /
//! transmit handler can run straight from the `UARTx_IRQ` vector.
//!
//! The PL011 has no software-settable transmit flag like the classic
//! 8051 `TI` bit, and its transmit interrupt only fires on a FIFO level
//! transition. A per-peripheral "armed" flag stands in for `TI`: the
//! foreground sets it and pends the interrupt, the handler keeps seeing
//! the transmit condition while the holding register has room, and the
//! flag drops once the transfer reports completion.

use embassy_rp::interrupt::{Interrupt, InterruptExt};
use embassy_rp::pac;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use lineecho_hal::serial::SerialPort;

use crate::uart::UartId;

/// Transfer armed, per peripheral
static TX_ARMED: [AtomicBool; 2] = [AtomicBool::new(false), AtomicBool::new(false)];

/// Received bytes flagged with a framing, parity, break or overrun error
static LINE_ERRORS: [AtomicU32; 2] = [AtomicU32::new(0), AtomicU32::new(0)];

/// Handle to one PL011 peripheral
///
/// Holds no state of its own besides the register block, so the
/// foreground and the interrupt handler can each create one.
#[derive(Clone, Copy)]
pub struct Pl011Port {
    id: UartId,
    regs: pac::uart::Uart,
}

impl Pl011Port {
    pub fn new(id: UartId) -> Self {
        let regs = match id {
            UartId::Uart0 => pac::UART0,
            UartId::Uart1 => pac::UART1,
        };
        Self { id, regs }
    }

    fn index(&self) -> usize {
        match self.id {
            UartId::Uart0 => 0,
            UartId::Uart1 => 1,
        }
    }

    /// Interrupt line of this peripheral
    pub fn irq(&self) -> Interrupt {
        match self.id {
            UartId::Uart0 => Interrupt::UART0_IRQ,
            UartId::Uart1 => Interrupt::UART1_IRQ,
        }
    }

    /// Switch to one-byte-per-interrupt operation
    ///
    /// Disables the FIFOs so every received byte raises its own receive
    /// condition, clears stale interrupts and unmasks receive. Baud rate,
    /// frame format and pin muxing must already be set up.
    pub fn enable_interrupts(&self) {
        self.regs.uartlcr_h().modify(|w| w.set_fen(false));
        self.regs.uarticr().write(|w| {
            w.set_rxic(true);
            w.set_rtic(true);
            w.set_txic(true);
        });
        self.regs.uartimsc().modify(|w| {
            w.set_rxim(true);
            w.set_rtim(true);
            w.set_txim(false);
        });
        TX_ARMED[self.index()].store(false, Ordering::Release);
    }

    /// Number of received bytes that carried a line error
    pub fn line_errors(&self) -> u32 {
        LINE_ERRORS[self.index()].load(Ordering::Relaxed)
    }
}

impl SerialPort for Pl011Port {
    fn rx_pending(&self) -> bool {
        !self.regs.uartfr().read().rxfe()
    }

    fn tx_pending(&self) -> bool {
        TX_ARMED[self.index()].load(Ordering::Acquire) && !self.regs.uartfr().read().txff()
    }

    fn clear_rx(&mut self) {
        self.regs.uarticr().write(|w| {
            w.set_rxic(true);
            w.set_rtic(true);
        });
    }

    fn clear_tx(&mut self) {
        self.regs.uarticr().write(|w| w.set_txic(true));
    }

    fn read_data(&mut self) -> u8 {
        let dr = self.regs.uartdr().read();
        if dr.fe() || dr.pe() || dr.be() || dr.oe() {
            LINE_ERRORS[self.index()].fetch_add(1, Ordering::Relaxed);
        }
        dr.data()
    }

    fn write_data(&mut self, byte: u8) {
        self.regs.uartdr().write(|w| w.set_data(byte));
    }

    fn request_tx(&mut self) {
        TX_ARMED[self.index()].store(true, Ordering::Release);
        self.regs.uartimsc().modify(|w| w.set_txim(true));
        // The transmit interrupt will not fire on its own while idle
        self.irq().pend();
    }

    fn tx_complete(&mut self) {
        TX_ARMED[self.index()].store(false, Ordering::Release);
        self.regs.uartimsc().modify(|w| w.set_txim(false));
    }
}

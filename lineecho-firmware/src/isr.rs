//! UART0 interrupt handler for interrupt-driven echo
//!
//! Runs the combined receive/transmit handler directly on the PL011
//! registers. The shared echo instance is guarded by a critical section,
//! so the arm task can touch it while this handler is enabled.

use embassy_rp::interrupt;

use lineecho_core::{EchoConfig, SharedEcho};
use lineecho_hal_rp2040::{Pl011Port, UartId};

use crate::channels::LINE_READY;
use crate::LINE_CAPACITY;

/// Line buffer shared between the interrupt and the arm task
pub static ECHO: SharedEcho<LINE_CAPACITY> = SharedEcho::new(EchoConfig::new());

#[interrupt]
unsafe fn UART0_IRQ() {
    let mut port = Pl011Port::new(UartId::Uart0);
    let serviced = ECHO.service(&mut port);

    // A finished transfer may leave a complete line behind that arrived
    // while draining, so the arm check has to run again
    if serviced.line_complete() || serviced.transfer_finished() {
        LINE_READY.signal(());
    }
}

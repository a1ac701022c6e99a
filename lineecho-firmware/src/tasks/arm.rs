//! Foreground arm task for interrupt-driven echo
//!
//! The UART interrupt fills and drains the shared line buffer on its own;
//! only starting a transfer needs the foreground. Rather than spinning on
//! the buffer state, this task sleeps until the interrupt reports that a
//! line completed or a transfer finished, then runs the arm check.

use defmt::*;

use lineecho_hal::serial::SerialPort;
use lineecho_hal_rp2040::{Pl011Port, UartId};

use crate::channels::LINE_READY;
use crate::isr::ECHO;

/// Arm task - starts a transfer once a complete line is buffered
#[embassy_executor::task]
pub async fn arm_task(uart: UartId) {
    info!("Arm task started");

    let mut port = Pl011Port::new(uart);
    let mut reported_drops: u32 = 0;
    let mut reported_errors: u32 = 0;

    loop {
        LINE_READY.wait().await;

        if ECHO.arm(&mut port) {
            debug!("Transfer armed");
        }

        let stats = ECHO.stats();
        if stats.dropped != reported_drops {
            warn!("{} bytes dropped on full buffer", stats.dropped.wrapping_sub(reported_drops));
            reported_drops = stats.dropped;
        }

        let errors = port.line_errors();
        if errors != reported_errors {
            warn!("{} bytes received with line errors", errors.wrapping_sub(reported_errors));
            reported_errors = errors;
        }

        trace!(
            "Echo: {} lines, {} received, {} sent, pending tx {}",
            stats.lines,
            stats.received,
            stats.transmitted,
            port.tx_pending()
        );
    }
}

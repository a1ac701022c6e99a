//! Echo UART transmit task
//!
//! Writes completed lines back out, one at a time, in arrival order.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::LINE_CHANNEL;

/// Echo TX task - sends each queued line
#[embassy_executor::task]
pub async fn echo_tx_task(mut tx: BufferedUartTx) {
    info!("Echo TX task started");

    let mut lines: u32 = 0;

    loop {
        let line = LINE_CHANNEL.receive().await;

        if line.is_empty() {
            continue;
        }

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send line: {:?}", e);
            continue;
        }
        if let Err(e) = tx.flush().await {
            warn!("Failed to flush line: {:?}", e);
            continue;
        }

        lines = lines.wrapping_add(1);
        trace!("Line {} sent ({} bytes)", lines, line.len());
    }
}

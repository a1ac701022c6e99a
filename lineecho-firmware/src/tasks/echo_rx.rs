//! Echo UART receive task
//!
//! Assembles received bytes into lines and hands each completed line to
//! the transmit task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use lineecho_core::{EchoConfig, LineAssembler};

use crate::channels::LINE_CHANNEL;
use crate::LINE_CAPACITY;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Echo RX task - collects lines and queues them for transmission
///
/// Sending into the channel waits while the transmitter is behind, so
/// reading pauses and the driver's receive buffer holds further input.
#[embassy_executor::task]
pub async fn echo_rx_task(mut rx: BufferedUartRx, config: EchoConfig) {
    info!("Echo RX task started");

    let mut assembler = LineAssembler::<LINE_CAPACITY>::new(config);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.feed(byte) {
                        Ok(Some(line)) => {
                            if line.is_truncated() {
                                warn!("Line exceeded {} bytes, tail dropped", LINE_CAPACITY);
                            }
                            debug!("Line complete: {} bytes", line.len());
                            LINE_CHANNEL.send(line).await;
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Dropped {=u8:#x}: {:?}", byte, e);
                        }
                    }
                }

                let stats = assembler.stats();
                if stats.has_overflowed() {
                    trace!("RX totals: {} received, {} dropped", stats.received, stats.dropped);
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(not(feature = "legacy-isr"))]
use embassy_sync::channel::Channel;
#[cfg(feature = "legacy-isr")]
use embassy_sync::signal::Signal;

#[cfg(not(feature = "legacy-isr"))]
use crate::EchoLine;

/// Completed lines waiting for the transmitter
///
/// A full channel stalls the receive task; the UART receive buffer holds
/// further input until the transmitter catches up.
#[cfg(not(feature = "legacy-isr"))]
const LINE_CHANNEL_SIZE: usize = 2;

/// Lines handed from the receive task to the transmit task
#[cfg(not(feature = "legacy-isr"))]
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, EchoLine, LINE_CHANNEL_SIZE> =
    Channel::new();

/// Raised by the UART interrupt when a line completes or a transfer ends
#[cfg(feature = "legacy-isr")]
pub static LINE_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

//! Serial line echo state machine
//!
//! Bytes from the receiver accumulate in a [`LineBuffer`](crate::buffer::LineBuffer).
//! Once a terminator has been received the foreground arms a transfer and
//! the transmit-complete handler drains the buffer, one transformed byte
//! per event, until the buffer is empty again.

pub mod engine;
pub mod state;

pub use engine::LineEcho;
pub use state::{EchoState, RxOutcome, Serviced, TxOutcome};

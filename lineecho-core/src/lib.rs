//! Board-agnostic core logic for the serial line echo
//!
//! This crate contains all echo logic that does not depend on specific
//! hardware implementations:
//!
//! - Fixed-capacity line buffer
//! - Combined receive/transmit state machine and foreground arm check
//! - Critical-section wrapper for sharing the echo with an interrupt handler
//! - Line assembler for task-based echo with overflow reporting
//! - Polled echo over blocking UART traits
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod assembler;
pub mod buffer;
pub mod config;
pub mod echo;
pub mod error;
pub mod polled;
pub mod shared;
pub mod stats;

pub use assembler::{Line, LineAssembler};
pub use buffer::{LineBuffer, DEFAULT_CAPACITY};
pub use config::{parse_config, EchoConfig};
pub use echo::{EchoState, LineEcho, RxOutcome, Serviced, TxOutcome};
pub use error::EchoError;
pub use polled::PolledEcho;
pub use shared::SharedEcho;
pub use stats::EchoStats;

//! lineecho Hardware Abstraction Layer
//!
//! This crate defines the serial abstractions the echo logic is written
//! against. Chip-specific HALs (RP2040, ...) implement them, and the `mock`
//! feature provides a host-side model of a flag-driven UART for tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (lineecho-firmware, etc.)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lineecho-core (buffer + state machine) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lineecho-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ lineecho-hal- │       │  mock (host)  │
//! │    rp2040     │       │               │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Blocking byte I/O (polled mode)
//! - [`serial::SerialPort`] - Receive/transmit pending flags and data
//!   register (interrupt mode)

#![no_std]
#![deny(unsafe_code)]

#[cfg(feature = "mock")]
pub mod mock;
pub mod serial;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use serial::SerialPort;
pub use uart::{Uart, UartConfig, UartRx, UartTx};

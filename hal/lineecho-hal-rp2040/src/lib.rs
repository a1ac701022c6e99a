//! RP2040-specific serial HAL for the line echo firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `lineecho-hal` traits:
//! - PL011 register access for interrupt-driven echo (`SerialPort`)
//! - Blocking UART wrapper for polled echo (`UartTx`/`UartRx`)
//! - UART pin mapping and configuration conversion

#![no_std]

pub mod pl011;
pub mod uart;

pub use pl011::Pl011Port;
pub use uart::{gpio_to_uart, to_embassy_config, uart_for_pins, BlockingUart, UartId, UartSetupError};

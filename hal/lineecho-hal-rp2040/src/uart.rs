//! UART peripheral selection and configuration
//!
//! RP2040 has two UART peripherals (UART0 and UART1), each routable to a
//! fixed set of GPIO pairs.

use embassy_rp::uart::{self, Blocking};

use lineecho_hal::uart::{DataBits, Parity, StopBits, UartConfig, UartRx, UartTx};

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Errors when mapping a serial setup onto the RP2040
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartSetupError {
    /// Pin cannot carry any UART function
    InvalidPin(u8),
    /// TX and RX pins belong to different peripherals
    PinMismatch,
    /// Pins are swapped (TX on an RX-capable pin)
    WrongDirection,
    /// Frame format the PL011 cannot produce
    UnsupportedFormat,
}

/// Determine which UART can use a given GPIO pin
///
/// RP2040 has specific pin mappings for each UART.
pub fn gpio_to_uart(gpio: u8) -> Option<UartId> {
    // UART0: GPIO 0/1, 12/13, 16/17, 28/29
    // UART1: GPIO 4/5, 8/9, 20/21, 24/25
    match gpio {
        0 | 1 | 12 | 13 | 16 | 17 | 28 | 29 => Some(UartId::Uart0),
        4 | 5 | 8 | 9 | 20 | 21 | 24 | 25 => Some(UartId::Uart1),
        _ => None,
    }
}

/// Check a TX/RX pin pair and return the peripheral they share
///
/// TX-capable pins are multiples of four; the RX pin follows its TX pin.
pub fn uart_for_pins(tx: u8, rx: u8) -> Result<UartId, UartSetupError> {
    let tx_uart = gpio_to_uart(tx).ok_or(UartSetupError::InvalidPin(tx))?;
    let rx_uart = gpio_to_uart(rx).ok_or(UartSetupError::InvalidPin(rx))?;

    if tx_uart != rx_uart {
        return Err(UartSetupError::PinMismatch);
    }
    if tx % 4 != 0 || rx % 4 != 1 {
        return Err(UartSetupError::WrongDirection);
    }

    Ok(tx_uart)
}

/// Convert a frame configuration into the embassy-rp UART configuration
///
/// The baud divisor itself is computed by embassy-rp from the peripheral
/// clock.
pub fn to_embassy_config(config: &UartConfig) -> Result<uart::Config, UartSetupError> {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
        DataBits::Nine => return Err(UartSetupError::UnsupportedFormat),
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    Ok(out)
}

/// Blocking embassy-rp UART exposed through the lineecho traits
pub struct BlockingUart<'d> {
    inner: uart::Uart<'d, Blocking>,
}

impl<'d> BlockingUart<'d> {
    pub fn new(inner: uart::Uart<'d, Blocking>) -> Self {
        Self { inner }
    }
}

impl UartTx for BlockingUart<'_> {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.blocking_flush()
    }
}

impl UartRx for BlockingUart<'_> {
    type Error = uart::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.inner.blocking_read(buf)?;
        Ok(buf.len())
    }
}

//! Embedded configuration loader
//!
//! Parses the embedded TOML and falls back to built-in defaults if it is
//! broken. build.rs validates the same file, so the fallback should only
//! trigger when the two parsers disagree.

use defmt::*;

use lineecho_core::config::{parse_config, EchoConfig};
use lineecho_hal_rp2040::{to_embassy_config, UartSetupError};

/// Embedded configuration (compiled into firmware)
/// Edit echo.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../echo.toml");

/// Load the echo configuration
pub fn load_config() -> EchoConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            EchoConfig::default()
        }
    }
}

/// Frame settings for the embassy-rp UART driver
///
/// A frame format the PL011 cannot produce falls back to 8-N-1 at the
/// configured baud rate.
pub fn uart_config(config: &EchoConfig) -> embassy_rp::uart::Config {
    match to_embassy_config(&config.uart) {
        Ok(uart) => uart,
        Err(UartSetupError::UnsupportedFormat) => {
            warn!("Unsupported UART frame format, using 8-N-1");
            let mut uart = embassy_rp::uart::Config::default();
            uart.baudrate = config.uart.baudrate;
            uart
        }
        Err(e) => {
            warn!("UART setup error: {:?}, using defaults", e);
            embassy_rp::uart::Config::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &EchoConfig) {
    info!("Configuration loaded successfully");
    debug!("  terminators: {=[u8]:#x}", config.terminators.as_slice());
    debug!("  transform: {:?}", config.transform);
    debug!("  overflow: {:?}", config.overflow);
    debug!("  terminator echo: {:?}", config.terminator_echo);
    debug!(
        "  uart: {} baud, 8-N-1: {}",
        config.uart.baudrate,
        config.uart.is_8n1()
    );
    debug!("  sysclk: {} Hz", config.sysclk_hz);
}

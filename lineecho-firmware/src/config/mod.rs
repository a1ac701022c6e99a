//! Configuration loading
//!
//! The echo configuration is embedded at build time from `echo.toml` and
//! parsed with the no_std parser from `lineecho-core`.

pub mod loader;

pub use loader::{load_config, uart_config};

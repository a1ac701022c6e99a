//! Configuration types
//!
//! Board-agnostic echo configuration and the TOML subset it is read from.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;

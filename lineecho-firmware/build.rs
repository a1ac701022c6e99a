//! Build script for lineecho-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates echo.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate echo.toml at compile time
///
/// The firmware's own parser only understands a subset of TOML; this
/// catches syntax and range errors before they turn into a silent fallback
/// to defaults on the device.
fn validate_config() {
    println!("cargo:rerun-if-changed=echo.toml");

    let config_path = Path::new("echo.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: echo.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds echo.toml as its configuration.             ║\n\
            ║  Please create one in the lineecho-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read echo.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in echo.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_echo(&config, &mut errors);
    validate_uart(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in echo.toml                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=echo.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the sections the firmware parser knows are allowed
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let table = match config.as_table() {
        Some(t) => t,
        None => return,
    };

    for (name, value) in table {
        if !["echo", "uart", "clock"].contains(&name.as_str()) {
            errors.push(format!("unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

fn validate_echo(config: &toml::Value, errors: &mut Vec<String>) {
    let echo = match config.get("echo").and_then(|e| e.as_table()) {
        Some(t) => t,
        None => return,
    };

    match echo.get("terminators") {
        Some(toml::Value::Array(items)) => {
            if items.is_empty() || items.len() > 4 {
                errors.push("[echo] terminators must list 1-4 bytes".to_string());
            }
            for item in items {
                match item.as_integer() {
                    Some(b) if (0..=255).contains(&b) => {}
                    _ => errors.push("[echo] terminators must be bytes 0-255".to_string()),
                }
            }
        }
        Some(_) => errors.push("[echo] terminators must be an array".to_string()),
        None => {}
    }

    if let Some(v) = echo.get("transform") {
        if !matches!(v.as_str(), Some("uppercase" | "none")) {
            errors.push("[echo] transform must be 'uppercase' or 'none'".to_string());
        }
    }

    if let Some(v) = echo.get("overflow") {
        if !matches!(v.as_str(), Some("drop" | "report")) {
            errors.push("[echo] overflow must be 'drop' or 'report'".to_string());
        }
    }

    if let Some(v) = echo.get("echo_terminator") {
        if !v.is_bool() {
            errors.push("[echo] echo_terminator must be true or false".to_string());
        }
    }
}

fn validate_uart(config: &toml::Value, errors: &mut Vec<String>) {
    let uart = match config.get("uart").and_then(|u| u.as_table()) {
        Some(t) => t,
        None => return,
    };

    if let Some(v) = uart.get("baudrate") {
        match v.as_integer() {
            Some(b) if b > 0 && b <= 921_600 => {}
            _ => errors.push("[uart] baudrate must be 1-921600".to_string()),
        }
    }

    // The RP2040 UART has no 9-bit mode
    if let Some(v) = uart.get("data_bits") {
        if !matches!(v.as_integer(), Some(7 | 8)) {
            errors.push("[uart] data_bits must be 7 or 8".to_string());
        }
    }

    if let Some(v) = uart.get("parity") {
        if !matches!(v.as_str(), Some("none" | "even" | "odd")) {
            errors.push("[uart] parity must be 'none', 'even' or 'odd'".to_string());
        }
    }

    if let Some(v) = uart.get("stop_bits") {
        if !matches!(v.as_integer(), Some(1 | 2)) {
            errors.push("[uart] stop_bits must be 1 or 2".to_string());
        }
    }
}

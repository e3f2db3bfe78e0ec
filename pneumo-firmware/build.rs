//! Build script for pneumo-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates machine.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sensor parts the firmware knows the transfer function of
const SENSOR_PARTS: [&str; 3] = ["SSCDANT030PG2A3", "SSCMRND030PG2A3", "SSCMRNN015PA3A3"];

/// Sections the runtime parser accepts
const SECTIONS: [&str; 6] = ["sensor", "sampling", "control", "switches", "bus", "valves"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

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

/// Validate machine.toml configuration at compile time
fn validate_config() {
    // Re-run if machine.toml changes
    println!("cargo:rerun-if-changed=machine.toml");

    let config_path = Path::new("machine.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: machine.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a machine.toml configuration file.          ║\n\
            ║  Please create one in the pneumo-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read machine.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in machine.toml                      ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_sensor(&config, &mut errors);
    validate_control(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_valves(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid machine configuration                            ║\n\
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

    println!("cargo:warning=machine.toml validated successfully");
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

/// Look up an integer key in a section
fn int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Reject sections the firmware parser does not know
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match value {
            toml::Value::Table(_) if !SECTIONS.contains(&name.as_str()) => {
                errors.push(format!("unknown section [{}]", name));
            }
            toml::Value::Integer(v) if name == "version" && *v != 1 => {
                errors.push(format!("unsupported version {}", v));
            }
            _ => {}
        }
    }
}

fn validate_sensor(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(part) = config.get("sensor").and_then(|s| s.get("part")) {
        match part.as_str() {
            Some(name) if SENSOR_PARTS.iter().any(|p| p.eq_ignore_ascii_case(name)) => {}
            Some(name) => errors.push(format!("[sensor] unknown part '{}'", name)),
            None => errors.push("[sensor] part must be a string".to_string()),
        }
    }

    if let Some(len) = int(config, "sensor", "frame_len") {
        if !(2..=4).contains(&len) {
            errors.push("[sensor] frame_len must be 2-4".to_string());
        }
    }
}

fn validate_control(config: &toml::Value, errors: &mut Vec<String>) {
    let low = int(config, "control", "low_mpsi").unwrap_or(100);
    let high = int(config, "control", "high_mpsi").unwrap_or(400);

    if low < 0 || high < 0 {
        errors.push("[control] setpoints must not be negative".to_string());
    }
    if low > high {
        errors.push(format!(
            "[control] low_mpsi ({}) exceeds high_mpsi ({})",
            low, high
        ));
    }
    if let Some(step) = int(config, "control", "step_mpsi") {
        if step < 1 {
            errors.push("[control] step_mpsi must be at least 1".to_string());
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(period) = int(config, "sampling", "period_ms") {
        if period < 1 {
            errors.push("[sampling] period_ms must be at least 1".to_string());
        }
    }
    if let Some(gate) = int(config, "switches", "debounce_ms") {
        if gate < 0 {
            errors.push("[switches] debounce_ms must not be negative".to_string());
        }
    }
    if let Some(freq) = int(config, "bus", "frequency_hz") {
        if !(1..=1_000_000).contains(&freq) {
            errors.push("[bus] frequency_hz must be 1-1000000".to_string());
        }
    }
}

fn validate_valves(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(valves) = config.get("valves").and_then(|v| v.as_table()) else {
        return;
    };

    for key in ["inflate_inverted", "deflate_inverted"] {
        if let Some(value) = valves.get(key) {
            if !value.is_bool() {
                errors.push(format!("[valves] {} must be true or false", key));
            }
        }
    }
}

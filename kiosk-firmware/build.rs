//! Build script for kiosk-firmware
//!
//! Validates kiosk.toml at compile time. The file is embedded into the
//! binary as the built-in configuration, so a broken file must fail the
//! build rather than the first boot.

use std::fs;
use std::path::Path;

/// Sections and the keys each one accepts
const SECTIONS: &[(&str, &[&str])] = &[
    ("payment", &["phone", "message", "mask"]),
    (
        "remote_display",
        &["host", "port", "width", "height", "timeout_ms"],
    ),
    ("identification", &["end_user_addr", "timeout_secs"]),
    ("keypad", &["poll_interval_ms", "debounce_ms"]),
    ("simulation", &["outcome", "name", "step_ms"]),
];

fn main() {
    validate_config();
}

/// Validate kiosk.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=kiosk.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("kiosk.toml");

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read kiosk.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Table = match toml::from_str(&config_content) {
        Ok(table) => table,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in kiosk.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_ranges(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid values in kiosk.toml                             ║\n\
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
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated: String = if line.chars().count() > 64 {
                line.chars().take(61).chain("...".chars()).collect()
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject unknown sections and keys
fn validate_sections(config: &toml::Table, errors: &mut Vec<String>) {
    for (name, value) in config {
        let Some((_, keys)) = SECTIONS.iter().find(|(section, _)| section == name) else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };
        let toml::Value::Table(table) = value else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn integer(config: &toml::Table, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

/// Validate numeric ranges
fn validate_ranges(config: &toml::Table, errors: &mut Vec<String>) {
    if let Some(port) = integer(config, "remote_display", "port") {
        if !(1..=65535).contains(&port) {
            errors.push("[remote_display] port must be 1-65535".to_string());
        }
    }
    for key in ["width", "height"] {
        if let Some(v) = integer(config, "remote_display", key) {
            if !(1..=2048).contains(&v) {
                errors.push(format!("[remote_display] {} must be 1-2048", key));
            }
        }
    }
    if let Some(v) = integer(config, "identification", "timeout_secs") {
        if v <= 0 {
            errors.push("[identification] timeout_secs must be positive".to_string());
        }
    }
    if let Some(toml::Value::String(outcome)) =
        config.get("simulation").and_then(|s| s.get("outcome"))
    {
        if !["complete", "failed", "silent"].contains(&outcome.as_str()) {
            errors.push("[simulation] outcome must be complete, failed or silent".to_string());
        }
    }
}

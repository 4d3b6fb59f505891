//! Build script for deck-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates deck.toml at compile time

use std::collections::HashMap;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// System clock assumed for PWM divider checks
const SYS_CLK_HZ: u64 = 125_000_000;

/// GPIO wired to PWM slice 5 channel A on the board
const MOTOR_PWM_PIN: u8 = 10;

/// Keys accepted in each section
const SECTIONS: &[(&str, &[&str])] = &[
    (
        "pins",
        &[
            "limited_close",
            "limited_open",
            "linked_power",
            "trigger_close",
            "trigger_open",
            "status_led",
            "bling_led",
            "motor_pwm",
            "motor_in1",
            "motor_in2",
        ],
    ),
    ("motor", &["speed_open", "speed_close"]),
    ("pwm", &["frequency_hz", "wrap"]),
    ("supervisor", &["enabled", "interval_ms"]),
    ("safety", &["stall_timeout_ms"]),
];

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

/// Validate deck.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=deck.toml");

    let config_path = Path::new("deck.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: deck.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds deck.toml as its configuration.             ║\n\
            ║  Please create one in the deck-firmware directory.               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read deck.toml                                 ║\n\
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
                ║  ERROR: Invalid TOML syntax in deck.toml                         ║\n\
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
    validate_structure(&config, &mut errors);
    validate_pins(&config, &mut errors);
    validate_pwm(&config, &mut errors);
    validate_supervisor(&config, &mut errors);
    validate_safety(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid deck configuration                               ║\n\
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

    println!("cargo:warning=deck.toml validated successfully");
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

/// Unknown sections and keys
fn validate_structure(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("deck.toml must be a table".to_string());
        return;
    };

    for (name, section) in root {
        let Some(keys) = SECTIONS.iter().find(|(s, _)| *s == name.as_str()).map(|(_, k)| *k) else {
            errors.push(format!("Unknown section [{}]", name));
            continue;
        };

        let Some(table) = section.as_table() else {
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

/// Parse "gpioN" with optional "!" / "^" prefixes
fn parse_pin(s: &str) -> Option<u8> {
    let pin = s.trim().trim_start_matches(['!', '^']).strip_prefix("gpio")?;
    let pin: u8 = pin.parse().ok()?;
    (pin < 30).then_some(pin)
}

fn get_int(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn validate_pins(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(pins) = config.get("pins").and_then(|p| p.as_table()) else {
        return;
    };

    let mut seen: HashMap<u8, &str> = HashMap::new();

    for (name, value) in pins {
        let Some(s) = value.as_str() else {
            errors.push(format!("[pins] {} must be a string like \"gpio15\"", name));
            continue;
        };

        let Some(pin) = parse_pin(s) else {
            errors.push(format!("[pins] {} = \"{}\" is not a valid pin", name, s));
            continue;
        };

        if let Some(other) = seen.insert(pin, name) {
            errors.push(format!("[pins] gpio{} used by both {} and {}", pin, other, name));
        }
    }

    if let Some(s) = pins.get("motor_pwm").and_then(|v| v.as_str()) {
        if parse_pin(s).is_some_and(|pin| pin != MOTOR_PWM_PIN) {
            errors.push(format!("[pins] motor_pwm must be gpio{}", MOTOR_PWM_PIN));
        }
    }
}

fn validate_pwm(config: &toml::Value, errors: &mut Vec<String>) {
    let wrap = get_int(config, "pwm", "wrap").unwrap_or(9999);
    let frequency = get_int(config, "pwm", "frequency_hz").unwrap_or(500);

    if !(1..=65534).contains(&wrap) {
        errors.push("[pwm] wrap must be 1-65534".to_string());
        return;
    }
    if frequency <= 0 {
        errors.push("[pwm] frequency_hz must be positive".to_string());
        return;
    }

    // Divider in 1/16 steps must fit 1.0 ..= 255 + 15/16
    let period = frequency as u64 * (wrap as u64 + 1);
    let divider_x16 = (SYS_CLK_HZ * 16 + period / 2) / period;
    if !(16..=4095).contains(&divider_x16) {
        errors.push(format!(
            "[pwm] {} Hz with wrap {} is unreachable at 125 MHz",
            frequency, wrap
        ));
    }

    for key in ["speed_open", "speed_close"] {
        if let Some(speed) = get_int(config, "motor", key) {
            if speed < 0 || speed > wrap + 1 {
                errors.push(format!("[motor] {} must be 0-{}", key, wrap + 1));
            }
        }
    }
}

fn validate_supervisor(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(interval) = get_int(config, "supervisor", "interval_ms") {
        if interval < 0 || interval > u32::MAX as i64 {
            errors.push("[supervisor] interval_ms must be 0 (off) or a period in ms".to_string());
        }
    }

    if let Some(section) = config.get("supervisor") {
        if let Some(enabled) = section.get("enabled") {
            if !enabled.is_bool() {
                errors.push("[supervisor] enabled must be true or false".to_string());
            }
        }
    }
}

fn validate_safety(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(timeout) = get_int(config, "safety", "stall_timeout_ms") {
        if timeout < 0 || timeout > u32::MAX as i64 {
            errors.push("[safety] stall_timeout_ms must be 0-4294967295".to_string());
        }
    }
}

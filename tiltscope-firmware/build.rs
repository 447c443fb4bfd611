//! Build script for tiltscope-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates pipeline.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const TIMING_KEYS: &[&str] = &[
    "acquisition_ms",
    "gesture_ms",
    "actuation_ms",
    "display_ms",
    "log_ms",
    "splash_poll_ms",
    "game_exit_poll_ms",
    "summary_hold_ms",
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

/// Validate pipeline.toml at compile time
///
/// The firmware falls back to defaults when the embedded file is rejected
/// at runtime; catching mistakes here keeps that from happening silently.
fn validate_config() {
    println!("cargo:rerun-if-changed=pipeline.toml");

    let config_path = Path::new("pipeline.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pipeline.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds pipeline.toml from the tiltscope-firmware   ║\n\
            ║  directory. An empty file selects the built-in defaults.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pipeline.toml                             ║\n\
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
                ║  ERROR: Invalid TOML syntax in pipeline.toml                     ║\n\
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
    validate_timing(&config, &mut errors);
    validate_gesture(&config, &mut errors);
    validate_plot(&config, &mut errors);
    validate_snake(&config, &mut errors);
    validate_acquisition(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid pipeline configuration                           ║\n\
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

    println!("cargo:warning=pipeline.toml validated successfully");
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

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::Table> {
    config.get(name).and_then(|s| s.as_table())
}

/// Integer or float as f64
fn number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Integer(i) => Some(*i as f64),
        toml::Value::Float(f) => Some(*f),
        _ => None,
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = section(config, "timing") else {
        return;
    };
    for key in TIMING_KEYS {
        match timing.get(*key) {
            None => {}
            Some(toml::Value::Integer(ms)) if *ms > 0 && *ms <= u32::MAX as i64 => {}
            Some(_) => errors.push(format!("[timing] {} must be a positive integer", key)),
        }
    }
}

fn validate_gesture(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(gesture) = section(config, "gesture") else {
        return;
    };
    for key in ["shake", "tilt", "flip"] {
        if let Some(value) = gesture.get(key) {
            if number(value).is_none() {
                errors.push(format!("[gesture] {} must be a number", key));
            }
        }
    }
    if let Some(shake) = gesture.get("shake").and_then(number) {
        if shake <= 0.0 {
            errors.push("[gesture] shake must be positive".to_string());
        }
    }
}

fn validate_plot(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(plot) = section(config, "plot") else {
        return;
    };
    for (kind, default_span) in [("accel", 40.0), ("mag", 5.0)] {
        let min_key = format!("{}_min", kind);
        let max_key = format!("{}_max", kind);
        let min = plot.get(&min_key).map(number);
        let max = plot.get(&max_key).map(number);
        if matches!(min, Some(None)) || matches!(max, Some(None)) {
            errors.push(format!("[plot] {} range must be numbers", kind));
            continue;
        }
        let min = min.flatten().unwrap_or(-default_span);
        let max = max.flatten().unwrap_or(default_span);
        if min >= max {
            errors.push(format!("[plot] {}_min must be below {}_max", kind, kind));
        }
    }
}

fn validate_snake(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(snake) = section(config, "snake") else {
        return;
    };
    let frame = |key: &str, default: i64| match snake.get(key) {
        Some(toml::Value::Integer(ms)) => Some(*ms),
        Some(_) => None,
        None => Some(default),
    };
    let base = frame("base_frame_ms", 300);
    let min = frame("min_frame_ms", 100);
    if base.is_none() || min.is_none() || frame("speedup_ms", 15).is_none() {
        errors.push("[snake] frame timings must be integers".to_string());
    }
    if let (Some(base), Some(min)) = (base, min) {
        if min > base {
            errors.push("[snake] min_frame_ms must not exceed base_frame_ms".to_string());
        }
    }
    if let Some(value) = snake.get("steer_threshold") {
        if number(value).is_none() {
            errors.push("[snake] steer_threshold must be a number".to_string());
        }
    }
}

fn validate_acquisition(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(acquisition) = section(config, "acquisition") else {
        return;
    };
    match acquisition.get("on_failure") {
        None => {}
        Some(toml::Value::String(policy)) if ["halt", "retry"].contains(&policy.as_str()) => {}
        Some(_) => errors.push("[acquisition] on_failure must be 'halt' or 'retry'".to_string()),
    }
    if let Some(value) = acquisition.get("max_consecutive") {
        match value {
            toml::Value::Integer(n) if (0..=u16::MAX as i64).contains(n) => {}
            _ => errors.push("[acquisition] max_consecutive must be 0-65535".to_string()),
        }
    }
}

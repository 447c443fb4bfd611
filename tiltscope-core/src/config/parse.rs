//! Simple TOML parser for pipeline configuration
//!
//! This is a minimal parser that handles only the subset needed for the
//! pipeline settings. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - `[section]` headers
//! - Key = value pairs (integer, float, string)
//! - Comments (# ...)
//!
//! Unknown sections and keys are skipped so older firmware accepts newer
//! files. Every key starts from its default value.

use core::str::FromStr;

use super::types::{ConfigError, FetchFailurePolicy, PipelineConfig};

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Gesture,
    Plot,
    Snake,
    Acquisition,
    Unknown,
}

/// Failure policy keys are collected separately and combined at the end,
/// because `max_consecutive` may appear before `on_failure`.
#[derive(Default)]
struct PolicyDraft {
    retry: Option<bool>,
    max_consecutive: Option<u16>,
}

/// Parse TOML configuration text into a [`PipelineConfig`]
///
/// The result is not validated; call [`PipelineConfig::validate`].
pub fn parse_config(input: &str) -> Result<PipelineConfig, ConfigError> {
    let mut config = PipelineConfig::default();
    let mut section = Section::Root;
    let mut policy = PolicyDraft::default();

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &mut policy)?;
        }
    }

    // max_consecutive alone leaves the default Halt policy in place
    match policy.retry {
        Some(true) => {
            config.acquisition.failure_policy = FetchFailurePolicy::Retry {
                max_consecutive: policy.max_consecutive.unwrap_or(0),
            };
        }
        Some(false) => config.acquisition.failure_policy = FetchFailurePolicy::Halt,
        None => {}
    }

    Ok(config)
}

/// Parse a header line like `[timing]`, inline comment allowed
fn parse_section_header(line: &str) -> Result<Section, ConfigError> {
    let line = match line.find('#') {
        Some(pos) => line[..pos].trim(),
        None => line,
    };
    if !line.ends_with(']') || line.len() < 3 {
        return Err(ConfigError::InvalidSection);
    }
    let name = line[1..line.len() - 1].trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidSection);
    }

    Ok(match name {
        "timing" => Section::Timing,
        "gesture" => Section::Gesture,
        "plot" => Section::Plot,
        "snake" => Section::Snake,
        "acquisition" => Section::Acquisition,
        _ => Section::Unknown,
    })
}

/// Split `key = value`, stripping an inline comment outside quotes
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_num<T: FromStr>(value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut PipelineConfig,
    policy: &mut PolicyDraft,
) -> Result<(), ConfigError> {
    match section {
        Section::Timing => {
            let t = &mut config.timing;
            let slot = match key {
                "acquisition_ms" => &mut t.acquisition_ms,
                "gesture_ms" => &mut t.gesture_ms,
                "actuation_ms" => &mut t.actuation_ms,
                "display_ms" => &mut t.display_ms,
                "log_ms" => &mut t.log_ms,
                "splash_poll_ms" => &mut t.splash_poll_ms,
                "game_exit_poll_ms" => &mut t.game_exit_poll_ms,
                "summary_hold_ms" => &mut t.summary_hold_ms,
                _ => return Ok(()),
            };
            *slot = parse_num(value)?;
        }
        Section::Gesture => {
            let g = &mut config.gesture;
            let slot = match key {
                "shake" => &mut g.shake,
                "tilt" => &mut g.tilt,
                "flip" => &mut g.flip,
                _ => return Ok(()),
            };
            *slot = parse_num(value)?;
        }
        Section::Plot => {
            let p = &mut config.plot;
            let slot = match key {
                "accel_min" => &mut p.accel.min,
                "accel_max" => &mut p.accel.max,
                "mag_min" => &mut p.mag.min,
                "mag_max" => &mut p.mag.max,
                _ => return Ok(()),
            };
            *slot = parse_num(value)?;
        }
        Section::Snake => match key {
            "base_frame_ms" => config.snake.base_frame_ms = parse_num(value)?,
            "speedup_ms" => config.snake.speedup_ms = parse_num(value)?,
            "min_frame_ms" => config.snake.min_frame_ms = parse_num(value)?,
            "steer_threshold" => config.snake.steer_threshold = parse_num(value)?,
            _ => {}
        },
        Section::Acquisition => match key {
            "on_failure" => {
                policy.retry = Some(match parse_string(value) {
                    "halt" => false,
                    "retry" => true,
                    _ => return Err(ConfigError::InvalidValue),
                });
            }
            "max_consecutive" => policy.max_consecutive = Some(parse_num(value)?),
            _ => {}
        },
        Section::Root | Section::Unknown => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlotRange;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), PipelineConfig::default());
        assert_eq!(
            parse_config("# just a comment\n\n").unwrap(),
            PipelineConfig::default()
        );
    }

    #[test]
    fn test_parse_full_file() {
        let text = r#"
# Tiltscope pipeline settings

[timing]
acquisition_ms = 20   # faster sampling
display_ms = 80

[gesture]
shake = 15.5
tilt = 3
flip = -8.0

[plot]
accel_min = -20.0
accel_max = 20.0

[snake]
base_frame_ms = 250
steer_threshold = 1.0

[acquisition]
on_failure = "retry"
max_consecutive = 5
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.timing.acquisition_ms, 20);
        assert_eq!(config.timing.display_ms, 80);
        assert_eq!(config.timing.gesture_ms, 200);
        assert_eq!(config.gesture.shake, 15.5);
        assert_eq!(config.gesture.tilt, 3.0);
        assert_eq!(config.gesture.flip, -8.0);
        assert_eq!(config.plot.accel, PlotRange::new(-20.0, 20.0));
        assert_eq!(config.plot.mag, PlotRange::symmetric(5.0));
        assert_eq!(config.snake.base_frame_ms, 250);
        assert_eq!(config.snake.steer_threshold, 1.0);
        assert_eq!(
            config.acquisition.failure_policy,
            FetchFailurePolicy::Retry { max_consecutive: 5 }
        );
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_policy_keys_in_any_order() {
        let text = "[acquisition]\nmax_consecutive = 3\non_failure = retry\n";
        assert_eq!(
            parse_config(text).unwrap().acquisition.failure_policy,
            FetchFailurePolicy::Retry { max_consecutive: 3 }
        );

        let text = "[acquisition]\non_failure = \"halt\"\n";
        assert_eq!(
            parse_config(text).unwrap().acquisition.failure_policy,
            FetchFailurePolicy::Halt
        );
    }

    #[test]
    fn test_unknown_keys_and_sections_ignored() {
        let text = "[timing]\nfuture_ms = 7\n[display]\ncontrast = 60\n";
        assert_eq!(parse_config(text).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_invalid_value() {
        assert_eq!(
            parse_config("[timing]\ndisplay_ms = fast\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[timing]\ndisplay_ms = -5\n"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[acquisition]\non_failure = \"panic\"\n"),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_invalid_section() {
        assert_eq!(parse_config("[timing\n"), Err(ConfigError::InvalidSection));
        assert_eq!(parse_config("[]\n"), Err(ConfigError::InvalidSection));
    }

    #[test]
    fn test_section_header_with_comment() {
        let text = "[snake] # game\nmin_frame_ms = 50\n";
        assert_eq!(parse_config(text).unwrap().snake.min_frame_ms, 50);
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(parse_key_value("a = 1"), Some(("a", "1")));
        assert_eq!(parse_key_value("a = \"x#y\""), Some(("a", "\"x#y\"")));
        assert_eq!(parse_key_value("a = 1 # c"), Some(("a", "1")));
        assert_eq!(parse_key_value("a ="), None);
        assert_eq!(parse_key_value("no equals"), None);
    }
}

//! Pipeline configuration
//!
//! `pipeline.toml` is compiled into the image and parsed once at boot with
//! the no_std parser from tiltscope-core. build.rs has already checked its
//! syntax, so a failure here means a value the runtime rejects.

use defmt::*;

use tiltscope_core::config::{parse_config, ConfigError, PipelineConfig};

/// Embedded configuration (compiled into firmware)
/// Edit pipeline.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../pipeline.toml");

fn parse_and_validate(text: &str) -> Result<PipelineConfig, ConfigError> {
    let config = parse_config(text)?;
    config.validate()?;
    Ok(config)
}

/// Load the embedded configuration, falling back to defaults
pub fn load() -> PipelineConfig {
    match parse_and_validate(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: acquisition={}ms display={}ms policy={:?}",
                config.timing.acquisition_ms,
                config.timing.display_ms,
                config.acquisition.failure_policy
            );
            config
        }
        Err(e) => {
            error!("pipeline.toml rejected ({:?}), using defaults", e);
            PipelineConfig::default()
        }
    }
}

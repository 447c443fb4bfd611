//! Pipeline configuration
//!
//! [`PipelineConfig`] holds every period, threshold and range the loops use.
//! Defaults match the shipped behaviour; [`parse_config`] overlays values
//! from a small TOML subset.

mod parse;
mod types;

pub use parse::parse_config;
pub use types::*;

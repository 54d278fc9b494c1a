//! Loading [`NexusConfig`] from TOML and applying command-line overrides.
//!
//! A config file holds any subset of the fields; the rest keep their
//! defaults:
//!
//! ```toml
//! earth_radius_km = 6371.0
//! confidence = 2.576
//! trend_threshold_pct = 10.0
//! similarity_decimals = 4
//! normalization_version = "v1.1"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use nexus_model::NexusConfig;
use tracing::{debug, info};

/// Values given on the command line, each replacing the file or default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub earth_radius_km: Option<f64>,
    pub confidence: Option<f64>,
    pub trend_threshold_pct: Option<f64>,
    pub similarity_decimals: Option<u32>,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: NexusConfig) -> NexusConfig {
        if let Some(radius) = self.earth_radius_km {
            config.earth_radius_km = radius;
        }
        if let Some(confidence) = self.confidence {
            config.confidence = confidence;
        }
        if let Some(threshold) = self.trend_threshold_pct {
            config.trend_threshold_pct = threshold;
        }
        if let Some(decimals) = self.similarity_decimals {
            config.similarity_decimals = decimals;
        }
        config
    }
}

/// Parses a TOML document into a config.
pub fn parse_config(content: &str) -> Result<NexusConfig> {
    toml::from_str(content).context("parse config")
}

/// Reads the config file when one is given, otherwise uses defaults.
///
/// An explicitly named file that is missing or malformed is an error.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<NexusConfig> {
    let base = match path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("load config: {}", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            config
        }
        None => {
            debug!("no config file given, using defaults");
            NexusConfig::default()
        }
    };
    Ok(overrides.apply(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("confidence = 2.576\nnormalization_version = \"v1.1\"\n").unwrap();
        assert_eq!(config.confidence, 2.576);
        assert_eq!(config.normalization_version, "v1.1");
        assert_eq!(config.earth_radius_km, NexusConfig::default().earth_radius_km);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(parse_config("similarity_decimals = \"three\"").is_err());
    }

    #[test]
    fn overrides_win_over_file() {
        let overrides = ConfigOverrides {
            trend_threshold_pct: Some(1.5),
            ..Default::default()
        };
        let config = overrides.apply(parse_config("trend_threshold_pct = 10.0").unwrap());
        assert_eq!(config.trend_threshold_pct, 1.5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = load_config(
            Some(Path::new("/nonexistent/nexus.toml")),
            &ConfigOverrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&NexusConfig::default()).unwrap();
        assert_eq!(parse_config(&text).unwrap(), NexusConfig::default());
    }
}

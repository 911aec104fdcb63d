//! Runtime configuration
//!
//! Loaded from a TOML file; a default file is written on first run so a bare
//! `tvguide-collector` invocation works out of the box. The response
//! timezone is configured once here and passed into every source and the
//! resolver fallback, never read from ambient state.

use anyhow::Result;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

pub mod defaults;

use defaults::*;

use crate::errors::{AppError, AppResult};
use crate::utils::time::resolve_timezone;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Target CSV path; fully rewritten on each run
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Timezone the channel sites report wall-clock times in.
    /// Either a fixed offset ("+03:00") or an IANA name ("Europe/Istanbul").
    #[serde(default = "default_response_timezone")]
    pub response_timezone: String,

    /// How many days of schedule to request from day-paged sources
    #[serde(default = "default_days_ahead")]
    pub days_ahead: u32,

    /// HTTP connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Channel slugs to collect, in output order.
    /// See `ScheduleSourceFactory::supported_slugs()` for valid values.
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            response_timezone: default_response_timezone(),
            days_ahead: default_days_ahead(),
            connect_timeout_secs: default_connect_timeout_secs(),
            channels: default_channels(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            collection: CollectionConfig::default(),
        }
    }
}

impl CollectionConfig {
    /// Resolve the configured timezone string to a fixed offset
    pub fn timezone_offset(&self) -> AppResult<FixedOffset> {
        resolve_timezone(&self.response_timezone).map_err(AppError::configuration)
    }
}

impl Config {
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            Ok(toml::from_str(&contents)?)
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            Ok(default_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.path, PathBuf::from("out/schedule.csv"));
        assert_eq!(config.collection.response_timezone, "+03:00");
        assert_eq!(config.collection.days_ahead, 7);
        assert_eq!(config.collection.channels.len(), 4);
    }

    #[test]
    fn partial_sections_keep_field_defaults() {
        let config: Config = toml::from_str(
            r#"
            [collection]
            channels = ["trt1"]
            "#,
        )
        .unwrap();
        assert_eq!(config.collection.channels, vec!["trt1".to_string()]);
        assert_eq!(config.collection.days_ahead, 7);
    }

    #[test]
    fn default_timezone_resolves_to_plus_three() {
        let config = Config::default();
        let offset = config.collection.timezone_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn bad_timezone_is_a_configuration_error() {
        let config: Config = toml::from_str(
            r#"
            [collection]
            response_timezone = "not-a-zone"
            "#,
        )
        .unwrap();
        assert!(config.collection.timezone_offset().is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.collection.channels, Config::default().collection.channels);
    }

    #[test]
    fn first_run_writes_a_default_file_and_reads_it_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_str().unwrap();

        let created = Config::load_from_file(path_str).unwrap();
        assert!(path.exists(), "default file should be written");
        assert_eq!(created.collection.days_ahead, 7);

        let reloaded = Config::load_from_file(path_str).unwrap();
        assert_eq!(reloaded.collection.channels, created.collection.channels);
    }
}

//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `skywatch-config.yaml` at the
//! project root. This module defines strongly-typed structs mirroring
//! the YAML layout, with serde defaults for every field so a missing
//! file or a partial file still yields a runnable configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

/// Greenwich, the fallback observation latitude.
pub const DEFAULT_LATITUDE: f64 = 51.476_9;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level Skywatch configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkywatchConfig {
    /// Observation site settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Snapshot scheduler settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Observer HTTP server settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// LED matrix push settings.
    #[serde(default)]
    pub matrix: MatrixConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SkywatchConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `LATITUDE` overrides `site.latitude`
    /// - `AWTRIXHOSTNAME` overrides `matrix.base_url`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        config.validate();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        config.validate();
        Ok(config)
    }

    /// Override settings with environment variables when set.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LATITUDE") {
            match val.parse::<f64>() {
                Ok(lat) => self.site.latitude = lat,
                Err(e) => warn!(value = val, error = %e, "ignoring unparseable LATITUDE"),
            }
        }
        if let Ok(val) = std::env::var("AWTRIXHOSTNAME") {
            self.matrix.base_url = val;
        }
    }

    /// Clamp out-of-range values back to safe defaults, warning loudly.
    fn validate(&mut self) {
        if !self.site.latitude.is_finite() || self.site.latitude.abs() > 90.0 {
            warn!(
                latitude = self.site.latitude,
                fallback = DEFAULT_LATITUDE,
                "invalid latitude, must be between -90 and 90; falling back to Greenwich"
            );
            self.site.latitude = DEFAULT_LATITUDE;
        }
    }
}

/// Observation site settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteConfig {
    /// Latitude in degrees for the daylight calculation.
    #[serde(default = "default_latitude")]
    pub latitude: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
        }
    }
}

/// Snapshot scheduler settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds between snapshot recomputations.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: default_update_interval_secs(),
        }
    }
}

/// Observer HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// LED matrix push settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MatrixConfig {
    /// Whether snapshot values are pushed to the LED matrix.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL of the Awtrix device.
    #[serde(default = "default_matrix_url")]
    pub base_url: String,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_matrix_url(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

const fn default_update_interval_secs() -> u64 {
    300
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_matrix_url() -> String {
    "http://moonclock.local".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SkywatchConfig::default();
        assert!((config.site.latitude - DEFAULT_LATITUDE).abs() < 1e-9);
        assert_eq!(config.schedule.update_interval_secs, 300);
        assert_eq!(config.server.port, 8080);
        assert!(config.matrix.enabled);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
site:
  latitude: -33.8688

schedule:
  update_interval_secs: 120

server:
  host: "127.0.0.1"
  port: 9090

matrix:
  enabled: false
  base_url: "http://matrix.lan"

logging:
  level: "debug"
"#;
        let config = SkywatchConfig::parse(yaml).unwrap();
        assert!((config.site.latitude - (-33.868_8)).abs() < 1e-9);
        assert_eq!(config.schedule.update_interval_secs, 120);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert!(!config.matrix.enabled);
        assert_eq!(config.matrix.base_url, "http://matrix.lan");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml_fills_defaults() {
        let config = SkywatchConfig::parse("server:\n  port: 3000\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.schedule.update_interval_secs, 300);
        assert!((config.site.latitude - DEFAULT_LATITUDE).abs() < 1e-9);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SkywatchConfig::parse("").is_ok());
    }

    #[test]
    fn out_of_range_latitude_falls_back_to_greenwich() {
        let config = SkywatchConfig::parse("site:\n  latitude: 123.4\n").unwrap();
        assert!((config.site.latitude - DEFAULT_LATITUDE).abs() < 1e-9);

        let config = SkywatchConfig::parse("site:\n  latitude: -95.0\n").unwrap();
        assert!((config.site.latitude - DEFAULT_LATITUDE).abs() < 1e-9);
    }

    #[test]
    fn southern_latitudes_are_accepted() {
        let config = SkywatchConfig::parse("site:\n  latitude: -51.0\n").unwrap();
        assert!((config.site.latitude - (-51.0)).abs() < 1e-9);
    }
}

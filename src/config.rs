//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Upstream service configuration (Nominatim + Open-Meteo)
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    #[serde(default = "default_air_quality_url")]
    pub air_quality_url: String,

    /// Contact address embedded in the Nominatim User-Agent (usage policy)
    #[serde(default = "default_contact")]
    pub contact: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Days of hourly history to request
    #[serde(default = "default_past_days")]
    pub past_days: u32,
}

fn default_geocode_url() -> String {
    crate::provider::DEFAULT_GEOCODE_URL.to_string()
}

fn default_forecast_url() -> String {
    crate::provider::DEFAULT_FORECAST_URL.to_string()
}

fn default_air_quality_url() -> String {
    crate::provider::DEFAULT_AIR_QUALITY_URL.to_string()
}

fn default_contact() -> String {
    "ops@airscope.example".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_past_days() -> u32 {
    7
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocode_url: default_geocode_url(),
            forecast_url: default_forecast_url(),
            air_quality_url: default_air_quality_url(),
            contact: default_contact(),
            request_timeout_secs: default_request_timeout(),
            past_days: default_past_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_filter() -> String {
    "airscope=info,tower_http=debug".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: default_log_format(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location if present, otherwise built-in defaults.
    ///
    /// Checks `$AIRSCOPE_CONFIG`, then `<config dir>/airscope/config.toml`.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("AIRSCOPE_CONFIG") {
            return Self::from_file(path);
        }

        let default_path = dirs::config_dir().map(|d| d.join("airscope").join("config.toml"));

        match default_path {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

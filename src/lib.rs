//! # AirScope
//!
//! Weather & Air Quality Dashboard - a full-stack Rust application serving
//! per-city weather and air-quality data assembled from Open-Meteo.
//!
//! ## Features
//!
//! - **Geocoding**: Resolves free-form city names via Nominatim
//! - **Weather + air quality**: Current conditions and 7 days of hourly
//!   history from the Open-Meteo forecast and air-quality APIs
//! - **One endpoint**: `GET /api/city-data?city=<name>` returns the combined
//!   payload the dashboard renders
//!
//! ## Modules
//!
//! - [`payload`]: The served `CityDataPayload` shape
//! - [`provider`]: Upstream clients and payload assembly
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use airscope::api::{serve, ApiConfig, AppState};
//! use airscope::config::Config;
//! use airscope::provider::OpenMeteoProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let provider = Arc::new(OpenMeteoProvider::new(&config.upstream)?);
//!
//!     let api_config = ApiConfig::new(&config.api.host, config.api.port);
//!     let state = AppState::new(provider, api_config.clone());
//!     serve(state, &api_config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod payload;
pub mod provider;

// Re-export top-level types for convenience
pub use payload::{AirQualityNow, CityDataPayload, Coords, CurrentWeather, Series};

pub use provider::{CityDataProvider, Geocoder, OpenMeteoProvider, Place, ProviderError};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig, UpstreamConfig};

//! Upstream Data Providers
//!
//! This module assembles a [`CityDataPayload`] from the external services:
//! - Nominatim (geocoding a city name to coordinates)
//! - Open-Meteo forecast API (current weather + hourly history)
//! - Open-Meteo air-quality API (hourly pollutant series)
//!
//! The [`CityDataProvider`] trait is the seam between the HTTP layer and the
//! upstream services; tests substitute a stub implementation.

mod geocode;
mod open_meteo;

pub use geocode::{Geocoder, Place, DEFAULT_GEOCODE_URL};
pub use open_meteo::{OpenMeteoProvider, DEFAULT_AIR_QUALITY_URL, DEFAULT_FORECAST_URL};

use async_trait::async_trait;

use crate::payload::CityDataPayload;

/// Source of per-city weather and air-quality payloads
#[async_trait]
pub trait CityDataProvider: Send + Sync {
    /// Resolve a city name and assemble its payload.
    ///
    /// Returns [`ProviderError::CityNotFound`] when geocoding yields no hit.
    async fn fetch_city(&self, city: &str) -> Result<CityDataPayload, ProviderError>;
}

/// Errors that can occur while talking to the upstream services
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("could not find '{0}'")]
    CityNotFound(String),

    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("unexpected {service} response: {message}")]
    Parse {
        service: &'static str,
        message: String,
    },
}

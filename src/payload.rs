//! City Data Payload
//!
//! The response shape served by `GET /api/city-data` and consumed by the
//! dashboard. Every leaf except the city name and coordinates is nullable;
//! the UI renders missing values as placeholders.

use serde::{Deserialize, Serialize};

/// One city's current weather, current air quality, and hourly history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDataPayload {
    /// Resolved display name from geocoding (may be longer than the query)
    pub city: String,
    /// Geocoded coordinates
    pub coords: Coords,
    /// Current weather snapshot
    #[serde(default)]
    pub current: CurrentWeather,
    /// Latest air-quality readings
    #[serde(default)]
    pub aq_now: AirQualityNow,
    /// Hourly series for the past days
    #[serde(default)]
    pub series: Series,
}

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather fields, all optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    #[serde(default)]
    pub wind_speed_kmh: Option<f64>,
}

/// Latest pollutant snapshot in ug/m3
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityNow {
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
}

/// Hourly series. Timestamps are the upstream's local-time ISO strings
/// ("2025-08-27T14:00"); value arrays align positionally with `time` and
/// may contain nulls where a sensor had no reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temp_c: Vec<Option<f64>>,
    #[serde(default)]
    pub pm2_5: Vec<Option<f64>>,
    #[serde(default)]
    pub pm10: Vec<Option<f64>>,
}

impl Series {
    /// Number of hourly samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

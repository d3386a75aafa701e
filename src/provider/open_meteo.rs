//! Open-Meteo Provider
//!
//! Fetches current weather + hourly history from the Open-Meteo forecast API
//! and hourly pollutants from the Open-Meteo air-quality API, then assembles
//! the combined [`CityDataPayload`]. The two upstream fetches for a city run
//! concurrently.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use super::{CityDataProvider, Geocoder, Place, ProviderError};
use crate::config::UpstreamConfig;
use crate::payload::{AirQualityNow, CityDataPayload, Coords, CurrentWeather, Series};

/// Default Open-Meteo forecast endpoint
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
/// Default Open-Meteo air-quality endpoint
pub const DEFAULT_AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

/// Live provider backed by Nominatim + Open-Meteo
pub struct OpenMeteoProvider {
    client: Client,
    geocoder: Geocoder,
    forecast_url: String,
    air_quality_url: String,
    past_days: u32,
}

// ============ Upstream response shapes ============

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentBlock>,
    #[serde(default)]
    hourly: Option<WeatherHourly>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    #[serde(default)]
    temperature_2m: Option<f64>,
    #[serde(default)]
    relative_humidity_2m: Option<f64>,
    #[serde(default)]
    wind_speed_10m: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WeatherHourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AirQualityResponse {
    #[serde(default)]
    hourly: Option<AirHourly>,
}

#[derive(Debug, Default, Deserialize)]
struct AirHourly {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    pm2_5: Vec<Option<f64>>,
    #[serde(default)]
    pm10: Vec<Option<f64>>,
    #[serde(default)]
    carbon_monoxide: Vec<Option<f64>>,
    #[serde(default)]
    ozone: Vec<Option<f64>>,
    #[serde(default)]
    nitrogen_dioxide: Vec<Option<f64>>,
    #[serde(default)]
    sulphur_dioxide: Vec<Option<f64>>,
}

impl OpenMeteoProvider {
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            geocoder: Geocoder::new(client.clone(), &config.geocode_url, &config.contact),
            client,
            forecast_url: config.forecast_url.clone(),
            air_quality_url: config.air_quality_url.clone(),
            past_days: config.past_days,
        })
    }

    async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse, ProviderError> {
        let url = format!(
            "{}?latitude={lat}&longitude={lon}\
             &current=temperature_2m,relative_humidity_2m,wind_speed_10m\
             &hourly=temperature_2m,relative_humidity_2m\
             &past_days={}&timezone=auto&wind_speed_unit=kmh",
            self.forecast_url, self.past_days
        );
        fetch_json(&self.client, &url, "open-meteo forecast").await
    }

    async fn fetch_air_quality(&self, lat: f64, lon: f64) -> Result<AirQualityResponse, ProviderError> {
        let url = format!(
            "{}?latitude={lat}&longitude={lon}\
             &hourly=pm2_5,pm10,carbon_monoxide,ozone,nitrogen_dioxide,sulphur_dioxide\
             &past_days={}&timezone=auto",
            self.air_quality_url, self.past_days
        );
        fetch_json(&self.client, &url, "open-meteo air-quality").await
    }
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
    service: &'static str,
) -> Result<T, ProviderError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(ProviderError::Status {
            service,
            status: response.status().as_u16(),
        });
    }

    response.json().await.map_err(|e| ProviderError::Parse {
        service,
        message: e.to_string(),
    })
}

#[async_trait]
impl CityDataProvider for OpenMeteoProvider {
    async fn fetch_city(&self, city: &str) -> Result<CityDataPayload, ProviderError> {
        let Some(place) = self.geocoder.geocode(city).await? else {
            return Err(ProviderError::CityNotFound(city.to_string()));
        };

        tracing::debug!(city = %place.name, lat = place.lat, lon = place.lon, "geocoded");

        let (weather, air) = tokio::try_join!(
            self.fetch_forecast(place.lat, place.lon),
            self.fetch_air_quality(place.lat, place.lon),
        )?;

        let now = Utc::now().format("%Y-%m-%dT%H:%M").to_string();
        Ok(assemble_payload(place, weather, air, &now))
    }
}

/// Combine the two upstream responses into the served payload
fn assemble_payload(
    place: Place,
    weather: ForecastResponse,
    air: AirQualityResponse,
    now_iso: &str,
) -> CityDataPayload {
    let current = weather.current.map_or_else(CurrentWeather::default, |c| CurrentWeather {
        temperature_c: c.temperature_2m,
        humidity_pct: c.relative_humidity_2m,
        wind_speed_kmh: c.wind_speed_10m,
    });

    let wh = weather.hourly.unwrap_or_default();
    let ah = air.hourly.unwrap_or_default();

    let aq_now = AirQualityNow {
        pm2_5: latest_value(&ah.time, &ah.pm2_5, now_iso),
        pm10: latest_value(&ah.time, &ah.pm10, now_iso),
        co: latest_value(&ah.time, &ah.carbon_monoxide, now_iso),
        o3: latest_value(&ah.time, &ah.ozone, now_iso),
        no2: latest_value(&ah.time, &ah.nitrogen_dioxide, now_iso),
        so2: latest_value(&ah.time, &ah.sulphur_dioxide, now_iso),
    };

    CityDataPayload {
        city: place.name,
        coords: Coords {
            lat: place.lat,
            lon: place.lon,
        },
        current,
        aq_now,
        series: Series {
            time: wh.time,
            temp_c: wh.temperature_2m,
            pm2_5: ah.pm2_5,
            pm10: ah.pm10,
        },
    }
}

/// Latest non-null value at or before `now_iso`.
///
/// Timestamps compare as ISO strings, minute precision. When no sample at or
/// before now has a value, falls back to the last non-null value anywhere in
/// the series.
fn latest_value(times: &[String], values: &[Option<f64>], now_iso: &str) -> Option<f64> {
    if times.is_empty() || values.is_empty() {
        return None;
    }

    let mut latest = None;
    for (t, v) in times.iter().zip(values.iter()) {
        if t.as_str() <= now_iso && v.is_some() {
            latest = *v;
        }
    }

    latest.or_else(|| values.iter().rev().find_map(|v| *v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn latest_value_picks_newest_at_or_before_now() {
        let t = times(&["2025-08-27T12:00", "2025-08-27T13:00", "2025-08-27T14:00"]);
        let v = vec![Some(1.0), Some(2.0), Some(3.0)];

        assert_eq!(latest_value(&t, &v, "2025-08-27T13:30"), Some(2.0));
        assert_eq!(latest_value(&t, &v, "2025-08-27T14:00"), Some(3.0));
    }

    #[test]
    fn latest_value_skips_null_samples() {
        let t = times(&["2025-08-27T12:00", "2025-08-27T13:00"]);
        let v = vec![Some(1.0), None];

        assert_eq!(latest_value(&t, &v, "2025-08-27T13:30"), Some(1.0));
    }

    #[test]
    fn latest_value_falls_back_to_last_non_null_future_sample() {
        // All samples after "now" (forecast-only series): last non-null wins
        let t = times(&["2025-08-28T09:00", "2025-08-28T10:00"]);
        let v = vec![Some(5.0), None];

        assert_eq!(latest_value(&t, &v, "2025-08-27T00:00"), Some(5.0));
    }

    #[test]
    fn latest_value_empty_and_all_null() {
        assert_eq!(latest_value(&[], &[], "2025-08-27T00:00"), None);

        let t = times(&["2025-08-27T12:00"]);
        assert_eq!(latest_value(&t, &[None], "2025-08-27T13:00"), None);
    }

    #[test]
    fn assembles_payload_from_upstream_shapes() {
        let place = Place {
            name: "Karachi, Sindh, Pakistan".to_string(),
            lat: 24.8607,
            lon: 67.0011,
        };
        let weather = ForecastResponse {
            current: Some(CurrentBlock {
                temperature_2m: Some(31.5),
                relative_humidity_2m: Some(70.0),
                wind_speed_10m: Some(14.2),
            }),
            hourly: Some(WeatherHourly {
                time: times(&["2025-08-27T13:00", "2025-08-27T14:00"]),
                temperature_2m: vec![Some(30.9), Some(31.5)],
            }),
        };
        let air = AirQualityResponse {
            hourly: Some(AirHourly {
                time: times(&["2025-08-27T13:00", "2025-08-27T14:00"]),
                pm2_5: vec![Some(40.0), Some(42.0)],
                pm10: vec![Some(85.0), Some(88.0)],
                carbon_monoxide: vec![None, Some(310.0)],
                ozone: vec![Some(61.0), None],
                nitrogen_dioxide: vec![None, None],
                sulphur_dioxide: vec![],
            }),
        };

        let payload = assemble_payload(place, weather, air, "2025-08-27T14:30");

        assert_eq!(payload.city, "Karachi, Sindh, Pakistan");
        assert_eq!(payload.current.temperature_c, Some(31.5));
        assert_eq!(payload.aq_now.pm2_5, Some(42.0));
        assert_eq!(payload.aq_now.co, Some(310.0));
        // o3 at 14:00 is null, so the 13:00 sample is the latest non-null
        assert_eq!(payload.aq_now.o3, Some(61.0));
        assert_eq!(payload.aq_now.no2, None);
        assert_eq!(payload.aq_now.so2, None);
        assert_eq!(payload.series.len(), 2);
        assert_eq!(payload.series.pm10, vec![Some(85.0), Some(88.0)]);
    }

    #[test]
    fn missing_upstream_sections_yield_empty_payload() {
        let place = Place {
            name: "Nowhere".to_string(),
            lat: 0.0,
            lon: 0.0,
        };
        let weather = ForecastResponse {
            current: None,
            hourly: None,
        };
        let air = AirQualityResponse { hourly: None };

        let payload = assemble_payload(place, weather, air, "2025-08-27T14:30");
        assert!(payload.current.temperature_c.is_none());
        assert!(payload.aq_now.pm2_5.is_none());
        assert!(payload.series.is_empty());
    }
}

//! Nominatim Geocoding Client
//!
//! Resolves a free-form city query to a display name and coordinates using
//! the OpenStreetMap Nominatim search API. Nominatim policy requires a
//! contact-bearing User-Agent, so the contact address is part of the
//! configuration rather than a hard-coded string.

use reqwest::Client;
use serde::Deserialize;

use super::ProviderError;

/// Default Nominatim endpoint
pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// A geocoded place: the top search hit for a city query
#[derive(Debug, Clone)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Nominatim search client
pub struct Geocoder {
    client: Client,
    base_url: String,
    user_agent: String,
}

/// Nominatim returns coordinates as JSON strings
#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    display_name: Option<String>,
    lat: String,
    lon: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: impl Into<String>, contact: &str) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            user_agent: format!("AirScope/{} (contact: {})", env!("CARGO_PKG_VERSION"), contact),
        }
    }

    /// Geocode a city query. `Ok(None)` means the query matched nothing.
    pub async fn geocode(&self, query: &str) -> Result<Option<Place>, ProviderError> {
        let url = format!(
            "{}?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::Status {
                service: "nominatim",
                status: response.status().as_u16(),
            });
        }

        let hits: Vec<SearchHit> = response.json().await?;
        let Some(top) = hits.into_iter().next() else {
            return Ok(None);
        };

        let lat = parse_coord(&top.lat)?;
        let lon = parse_coord(&top.lon)?;

        Ok(Some(Place {
            name: top.display_name.unwrap_or_else(|| query.to_string()),
            lat,
            lon,
        }))
    }
}

fn parse_coord(raw: &str) -> Result<f64, ProviderError> {
    raw.parse().map_err(|_| ProviderError::Parse {
        service: "nominatim",
        message: format!("non-numeric coordinate '{raw}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_coordinates() {
        assert_eq!(parse_coord("24.8607").unwrap(), 24.8607);
        assert_eq!(parse_coord("-67.0011").unwrap(), -67.0011);
    }

    #[test]
    fn rejects_garbage_coordinates() {
        assert!(parse_coord("north-ish").is_err());
    }

    #[test]
    fn search_hit_deserializes_nominatim_shape() {
        let json = r#"[{"display_name": "Karachi, Sindh, Pakistan", "lat": "24.8607", "lon": "67.0011", "class": "place"}]"#;
        let hits: Vec<SearchHit> = serde_json::from_str(json).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name.as_deref(), Some("Karachi, Sindh, Pakistan"));
    }
}

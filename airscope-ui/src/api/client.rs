//! HTTP API Client
//!
//! Functions for communicating with the AirScope REST API.

use gloo_net::http::Request;

use crate::state::global::CityDataPayload;

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8082";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(url)) = storage.get_item("airscope_api_url") {
                url
            } else {
                DEFAULT_API_BASE.to_string()
            }
        } else {
            DEFAULT_API_BASE.to_string()
        }
    } else {
        DEFAULT_API_BASE.to_string()
    };
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item("airscope_api_url", url);
        }
    }
}

/// Server error envelope: `{ "error": { "code", "message" }, "request_id" }`
#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Fetch one city's payload.
///
/// A non-2xx status is an error naming that status; the server's error
/// message is appended when the body carries one.
pub async fn fetch_city_data(city: &str) -> Result<CityDataPayload, String> {
    let api_base = get_api_base();

    let response = Request::get(&format!("{}/api/city-data", api_base))
        .query([("city", city)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        let status = response.status();
        return Err(match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => format!("Error {}: {}", status, envelope.error.message),
            Err(_) => format!("Error: HTTP {}", status),
        });
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

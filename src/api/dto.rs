//! Data Transfer Objects
//!
//! Response types for the API endpoints beyond the city payload itself
//! (which lives in [`crate::payload`]).

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /api/city-data`
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    #[serde(default)]
    pub city: String,
}

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// Whether the upstream forecast service answered the last probe
    pub upstream: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}

//! AirScope REST API
//!
//! HTTP API layer for AirScope, built with Axum.
//!
//! # Endpoints
//!
//! ## City data
//! - `GET /api/city-data?city=<name>` - Assembled weather + air-quality payload
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use airscope::api::{serve, ApiConfig, AppState};
//! use airscope::config::Config;
//! use airscope::provider::OpenMeteoProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let provider = Arc::new(OpenMeteoProvider::new(&config.upstream)?);
//!     let state = AppState::new(provider, ApiConfig::default());
//!     serve(state, &ApiConfig::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route("/city-data", get(routes::city_data::city_data));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // The dashboard is served from its own origin
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("AirScope API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("AirScope API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{AirQualityNow, CityDataPayload, Coords, CurrentWeather, Series};
    use crate::provider::{CityDataProvider, ProviderError};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    /// Stub provider: knows "Karachi", fails on "Glitchton", 404s the rest
    struct StubProvider;

    #[async_trait]
    impl CityDataProvider for StubProvider {
        async fn fetch_city(&self, city: &str) -> Result<CityDataPayload, ProviderError> {
            match city {
                "Karachi" => Ok(CityDataPayload {
                    city: "Karachi, Sindh, Pakistan".to_string(),
                    coords: Coords {
                        lat: 24.8607,
                        lon: 67.0011,
                    },
                    current: CurrentWeather {
                        temperature_c: Some(31.5),
                        humidity_pct: Some(70.0),
                        wind_speed_kmh: Some(14.2),
                    },
                    aq_now: AirQualityNow {
                        pm2_5: Some(10.0),
                        ..Default::default()
                    },
                    series: Series::default(),
                }),
                "Glitchton" => Err(ProviderError::Status {
                    service: "open-meteo forecast",
                    status: 503,
                }),
                other => Err(ProviderError::CityNotFound(other.to_string())),
            }
        }
    }

    fn test_app() -> Router {
        let state = AppState::new(Arc::new(StubProvider), ApiConfig::default());
        build_router(state)
    }

    async fn get_response(uri: &str) -> axum::response::Response {
        test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get_response("/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get_response("/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get_response("/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_city_data_blank_city_is_bad_request() {
        let response = get_response("/api/city-data?city=%20%20").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_city_data_missing_param_is_bad_request() {
        let response = get_response("/api/city-data").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_city_data_unknown_city_is_not_found() {
        let response = get_response("/api/city-data?city=Atlantis").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_city_data_upstream_failure_is_bad_gateway() {
        let response = get_response("/api/city-data?city=Glitchton").await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_city_data_success_passes_payload_through() {
        let response = get_response("/api/city-data?city=Karachi").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: CityDataPayload = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload.city, "Karachi, Sindh, Pakistan");
        assert_eq!(payload.aq_now.pm2_5, Some(10.0));
    }
}

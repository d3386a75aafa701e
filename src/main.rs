//! AirScope API Server
//!
//! Run with: cargo run --bin airscope
//!
//! # Configuration
//!
//! Environment variables:
//! - `AIRSCOPE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `AIRSCOPE_PORT`: Port to listen on (default: 8082)
//! - `AIRSCOPE_CONTACT`: Contact address for the Nominatim User-Agent
//! - `AIRSCOPE_CONFIG`: Path to a TOML config file (optional)
//! - `RUST_LOG`: Log level (default: airscope=info,tower_http=debug)

use airscope::api::{serve, ApiConfig, AppState};
use airscope::config::Config;
use airscope::provider::OpenMeteoProvider;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (file defaults, then environment overrides)
    let mut config = Config::load()?;
    apply_env_overrides(&mut config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting AirScope API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Forecast upstream: {}", config.upstream.forecast_url);
    tracing::info!("Air-quality upstream: {}", config.upstream.air_quality_url);

    // Build the upstream provider
    let provider = Arc::new(OpenMeteoProvider::new(&config.upstream)?);

    let api_config = ApiConfig::new(&config.api.host, config.api.port);
    let state = AppState::new(provider, api_config.clone());

    // Run server
    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("AirScope API server stopped");
    Ok(())
}

/// Apply environment variable overrides on top of file/default config
fn apply_env_overrides(config: &mut Config) {
    if let Ok(host) = std::env::var("AIRSCOPE_HOST") {
        config.api.host = host;
    }

    if let Some(port) = std::env::var("AIRSCOPE_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config.api.port = port;
    }

    if let Ok(contact) = std::env::var("AIRSCOPE_CONTACT") {
        config.upstream.contact = contact;
    }
}

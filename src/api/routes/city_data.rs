//! City Data Route
//!
//! `GET /api/city-data?city=<name>` - the single data endpoint the dashboard
//! talks to. Validates the query, delegates to the provider, and maps
//! provider failures onto API errors (blank city -> 400, unknown city -> 404,
//! upstream trouble -> 502).

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::CityQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::payload::CityDataPayload;

/// GET /api/city-data
pub async fn city_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityQuery>,
) -> ApiResult<Json<CityDataPayload>> {
    let city = query.city.trim();
    if city.is_empty() {
        return Err(ApiError::Validation("city is required".to_string()));
    }

    tracing::info!(city = %city, "city data requested");

    let payload = state.provider.fetch_city(city).await?;

    tracing::debug!(
        city = %payload.city,
        samples = payload.series.len(),
        "city data assembled"
    );

    Ok(Json(payload))
}

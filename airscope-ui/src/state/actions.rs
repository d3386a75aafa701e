//! Request Orchestrator
//!
//! Drives the dashboard state machine: Idle -> LoadingSingle -> Idle and
//! Idle -> LoadingComparison -> Idle. On success the other mode's visuals are
//! torn down before the new view is applied; on failure nothing but the
//! loaders changes. Every submission bumps the request generation, and a
//! completion whose generation is no longer current is discarded, so a slow
//! stale response can never overwrite a newer view.

use leptos::*;

use crate::api;
use crate::state::global::{CityDataPayload, GlobalState, ViewMode};

/// Load one city and switch the dashboard to single mode
pub fn load_city(state: GlobalState, city: String) {
    let city = city.trim().to_string();
    if city.is_empty() {
        return;
    }

    let generation = state.begin_request();
    state.loading.set(true);
    state.single_busy.set(true);

    spawn_local(async move {
        let result = api::fetch_city_data(&city).await;

        state.loading.set(false);
        state.single_busy.set(false);

        if !state.is_current(generation) {
            // A newer submission superseded this one
            return;
        }

        match result {
            Ok(payload) => apply_single(&state, payload),
            Err(e) => state.show_error(&e),
        }
    });
}

/// Load two cities concurrently and switch to comparison mode.
/// All-or-nothing: if either fetch fails, no visual state changes.
pub fn load_comparison(state: GlobalState, city_a: String, city_b: String) {
    let city_a = city_a.trim().to_string();
    let city_b = city_b.trim().to_string();
    if city_a.is_empty() || city_b.is_empty() {
        return;
    }

    let generation = state.begin_request();
    state.loading.set(true);
    state.compare_busy.set(true);

    spawn_local(async move {
        let (result_a, result_b) = futures_util::future::join(
            api::fetch_city_data(&city_a),
            api::fetch_city_data(&city_b),
        )
        .await;

        state.loading.set(false);
        state.compare_busy.set(false);

        if !state.is_current(generation) {
            return;
        }

        match combine(result_a, result_b) {
            Ok((payload_a, payload_b)) => apply_comparison(&state, payload_a, payload_b),
            Err(e) => state.show_error(&e),
        }
    });
}

/// Collapse the two fetch outcomes into one: a single combined error if
/// either leg failed
fn combine(
    a: Result<CityDataPayload, String>,
    b: Result<CityDataPayload, String>,
) -> Result<(CityDataPayload, CityDataPayload), String> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), _) | (_, Err(e)) => {
            Err(format!("One of the cities could not be loaded: {e}"))
        }
    }
}

/// Tear down comparison visuals, then bring up the single-city view
fn apply_single(state: &GlobalState, payload: CityDataPayload) {
    state.mode.set(ViewMode::Single);
    state.comparison.set(None);

    state.charts.update_value(|charts| {
        charts.destroy_comparison();
        charts.draw_single(&payload.series);
    });
    state.map.update_value(|map| map.show_single(&payload));

    state.single.set(Some(payload));
    state.has_data.set(true);
    state.last_updated.set(Some(chrono::Utc::now().timestamp_millis()));
}

/// Tear down single-city visuals, then bring up the comparison view
fn apply_comparison(state: &GlobalState, payload_a: CityDataPayload, payload_b: CityDataPayload) {
    state.single.set(None);

    state.charts.update_value(|charts| {
        charts.destroy_single();
        charts.draw_comparison(&payload_a, &payload_b);
    });
    state.map.update_value(|map| map.show_comparison(&payload_a, &payload_b));

    state.mode.set(ViewMode::Comparison);
    state.comparison.set(Some((payload_a, payload_b)));
    state.has_data.set(true);
    state.last_updated.set(Some(chrono::Utc::now().timestamp_millis()));
}

/// Back to the empty dashboard. Favorites are untouched.
pub fn reset(state: GlobalState) {
    // Invalidate any response still in flight
    state.begin_request();

    state.single.set(None);
    state.comparison.set(None);
    state.charts.update_value(|charts| charts.destroy_all());
    state.map.update_value(|map| map.clear_all());

    state.mode.set(ViewMode::Single);
    state.has_data.set(false);
    state.loading.set(false);
    state.single_busy.set(false);
    state.compare_busy.set(false);

    state.city_input.set(String::new());
    state.compare_a_input.set(String::new());
    state.compare_b_input.set(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{AirQualityNow, Coords, CurrentWeather, Series};

    fn payload(city: &str) -> CityDataPayload {
        CityDataPayload {
            city: city.to_string(),
            coords: Coords {
                lat: 24.8607,
                lon: 67.0011,
            },
            current: CurrentWeather::default(),
            aq_now: AirQualityNow {
                pm2_5: Some(10.0),
                ..Default::default()
            },
            series: Series {
                time: vec!["2025-08-27T13:00".to_string()],
                temp_c: vec![Some(30.9)],
                pm2_5: vec![Some(10.0)],
                pm10: vec![Some(20.0)],
            },
        }
    }

    fn with_state(f: impl FnOnce(GlobalState)) {
        let runtime = create_runtime();
        f(GlobalState::new());
        runtime.dispose();
    }

    #[test]
    fn combine_requires_both_legs() {
        let ok = combine(Ok(payload("A")), Ok(payload("B")));
        assert!(ok.is_ok());

        let err = combine(Ok(payload("A")), Err("Error: HTTP 404".to_string()));
        let msg = err.unwrap_err();
        assert!(msg.contains("One of the cities could not be loaded"));
        assert!(msg.contains("404"));

        assert!(combine(Err("x".to_string()), Ok(payload("B"))).is_err());
    }

    #[test]
    fn apply_single_tears_down_comparison_first() {
        with_state(|state| {
            apply_comparison(&state, payload("A"), payload("B"));
            assert_eq!(state.mode.get_untracked(), ViewMode::Comparison);
            state.charts.with_value(|c| assert_eq!(c.live_count(), 2));
            state.map.with_value(|m| assert_eq!(m.marker_count(), 2));

            apply_single(&state, payload("Karachi"));

            assert_eq!(state.mode.get_untracked(), ViewMode::Single);
            assert!(state.comparison.get_untracked().is_none());
            state.charts.with_value(|c| {
                assert_eq!(c.live_count(), 2);
                assert!(c.compare_temp().is_none());
                assert!(c.single_temp().is_some());
            });
            state.map.with_value(|m| {
                assert_eq!(m.marker_count(), 1);
                assert!(m.single_marker().is_some());
            });
            assert!(state.has_data.get_untracked());
        });
    }

    #[test]
    fn apply_comparison_clears_single_view() {
        with_state(|state| {
            apply_single(&state, payload("Karachi"));

            apply_comparison(&state, payload("A"), payload("B"));

            assert!(state.single.get_untracked().is_none());
            state.charts.with_value(|c| {
                assert!(c.single_temp().is_none());
                assert!(c.single_pm().is_none());
                assert_eq!(c.live_count(), 2);
            });
            state.map.with_value(|m| assert_eq!(m.comparison_markers().len(), 2));
        });
    }

    #[test]
    fn reset_clears_everything_but_favorites() {
        with_state(|state| {
            state.favorites.set(vec!["Karachi".to_string()]);
            state.city_input.set("Karachi".to_string());
            apply_single(&state, payload("Karachi"));

            reset(state);

            assert!(state.single.get_untracked().is_none());
            assert!(state.comparison.get_untracked().is_none());
            assert!(!state.has_data.get_untracked());
            assert_eq!(state.mode.get_untracked(), ViewMode::Single);
            assert!(state.city_input.get_untracked().is_empty());
            state.charts.with_value(|c| assert_eq!(c.live_count(), 0));
            state.map.with_value(|m| assert_eq!(m.marker_count(), 0));

            // favorites survive reset
            assert_eq!(state.favorites.get_untracked(), vec!["Karachi".to_string()]);
        });
    }

    #[test]
    fn stale_generations_are_detected() {
        with_state(|state| {
            let first = state.begin_request();
            assert!(state.is_current(first));

            let second = state.begin_request();
            assert!(!state.is_current(first));
            assert!(state.is_current(second));

            // reset also invalidates in-flight requests
            reset(state);
            assert!(!state.is_current(second));
        });
    }
}

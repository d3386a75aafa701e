//! Global Application State
//!
//! Reactive state management using Leptos signals. The chart slots and the
//! map view are plain owned values (not signals): they are mutated only by
//! the request orchestrator in [`crate::state::actions`] and repaint
//! imperatively, so they live in `StoredValue` containers on the state.

use leptos::*;

use crate::components::chart::ChartSlots;
use crate::components::map::MapView;
use crate::state::favorites;

/// Which dashboard layout is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Single,
    Comparison,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Active layout; switching tears down the other mode's visuals
    pub mode: RwSignal<ViewMode>,
    /// Payload behind the cards / single charts / single marker
    pub single: RwSignal<Option<CityDataPayload>>,
    /// The two payloads behind comparison mode
    pub comparison: RwSignal<Option<(CityDataPayload, CityDataPayload)>>,
    /// Persisted favorite city names
    pub favorites: RwSignal<Vec<String>>,
    /// Full-page loader
    pub loading: RwSignal<bool>,
    /// Single-city form button loader
    pub single_busy: RwSignal<bool>,
    /// Comparison form button loader
    pub compare_busy: RwSignal<bool>,
    /// Whether any city has been loaded (reveals the reset control)
    pub has_data: RwSignal<bool>,
    /// Last successful load, ms since epoch
    pub last_updated: RwSignal<Option<i64>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
    /// Single-city search input
    pub city_input: RwSignal<String>,
    /// Comparison inputs
    pub compare_a_input: RwSignal<String>,
    pub compare_b_input: RwSignal<String>,
    /// Monotonic request generation; stale completions are discarded
    pub request_gen: StoredValue<u64>,
    /// The four owned chart slots
    pub charts: StoredValue<ChartSlots>,
    /// The owned map view (markers + viewport)
    pub map: StoredValue<MapView>,
}

// ============ Payload types (mirrors the API response) ============

/// One city's current weather, current air quality, and hourly history
#[derive(Clone, Debug, serde::Deserialize)]
pub struct CityDataPayload {
    pub city: String,
    pub coords: Coords,
    #[serde(default)]
    pub current: CurrentWeather,
    #[serde(default)]
    pub aq_now: AirQualityNow,
    #[serde(default)]
    pub series: Series,
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    #[serde(default)]
    pub wind_speed_kmh: Option<f64>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
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

/// Hourly series; value arrays align positionally with `time`
#[derive(Clone, Debug, Default, serde::Deserialize)]
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

/// Provide global state to the component tree
pub fn provide_global_state() {
    provide_context(GlobalState::new());
}

impl GlobalState {
    /// Fresh state; favorites come straight from persistent storage
    pub fn new() -> Self {
        Self {
            mode: create_rw_signal(ViewMode::Single),
            single: create_rw_signal(None),
            comparison: create_rw_signal(None),
            favorites: create_rw_signal(favorites::load()),
            loading: create_rw_signal(false),
            single_busy: create_rw_signal(false),
            compare_busy: create_rw_signal(false),
            has_data: create_rw_signal(false),
            last_updated: create_rw_signal(None),
            error: create_rw_signal(None),
            success: create_rw_signal(None),
            city_input: create_rw_signal(String::new()),
            compare_a_input: create_rw_signal(String::new()),
            compare_b_input: create_rw_signal(String::new()),
            request_gen: store_value(0),
            charts: store_value(ChartSlots::default()),
            map: store_value(MapView::default()),
        }
    }

    /// Start a new request, invalidating any still in flight
    pub fn begin_request(&self) -> u64 {
        self.request_gen.update_value(|g| *g += 1);
        self.request_gen.get_value()
    }

    /// Whether a completion with this generation is still the newest request
    pub fn is_current(&self, generation: u64) -> bool {
        self.request_gen.get_value() == generation
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

//! City Cards
//!
//! The card grid showing the loaded city's name, coordinates, current
//! weather, and the six air-quality readings. Every slot falls back to the
//! placeholder when its field is missing; the PM2.5 slot also carries the
//! air-quality class. Rendering is reactive over the payload signal, so
//! resetting the cards is just clearing that signal.

use leptos::*;

use crate::format::{aqi_class, fmt_coords, fmt_value, PLACEHOLDER};
use crate::state::global::{CityDataPayload, GlobalState};

/// Everything the card grid displays, precomputed from the payload
#[derive(Clone, Debug, PartialEq)]
pub struct CardViewModel {
    pub city: String,
    pub coords: String,
    pub temp: String,
    pub humidity: String,
    pub wind: String,
    pub pm2_5: String,
    pub pm2_5_class: &'static str,
    pub pm10: String,
    pub co: String,
    pub o3: String,
    pub no2: String,
    pub so2: String,
}

/// Map a payload (or its absence) onto card slot contents
pub fn card_view_model(payload: Option<&CityDataPayload>) -> CardViewModel {
    match payload {
        None => CardViewModel {
            city: PLACEHOLDER.to_string(),
            coords: PLACEHOLDER.to_string(),
            temp: PLACEHOLDER.to_string(),
            humidity: PLACEHOLDER.to_string(),
            wind: PLACEHOLDER.to_string(),
            pm2_5: PLACEHOLDER.to_string(),
            pm2_5_class: "",
            pm10: PLACEHOLDER.to_string(),
            co: PLACEHOLDER.to_string(),
            o3: PLACEHOLDER.to_string(),
            no2: PLACEHOLDER.to_string(),
            so2: PLACEHOLDER.to_string(),
        },
        Some(p) => CardViewModel {
            city: p.city.clone(),
            coords: fmt_coords(p.coords.lat, p.coords.lon),
            temp: fmt_value(p.current.temperature_c),
            humidity: fmt_value(p.current.humidity_pct),
            wind: fmt_value(p.current.wind_speed_kmh),
            pm2_5: fmt_value(p.aq_now.pm2_5),
            pm2_5_class: aqi_class(p.aq_now.pm2_5),
            pm10: fmt_value(p.aq_now.pm10),
            co: fmt_value(p.aq_now.co),
            o3: fmt_value(p.aq_now.o3),
            no2: fmt_value(p.aq_now.no2),
            so2: fmt_value(p.aq_now.so2),
        },
    }
}

/// The city card grid
#[component]
pub fn CityCards() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let vm = create_memo(move |_| card_view_model(state.single.get().as_ref()));

    view! {
        <div class="grid md:grid-cols-3 gap-4">
            // City card
            <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
                <span class="text-gray-400 text-sm">"City"</span>
                <div class="text-2xl font-bold mt-2">{move || vm.get().city}</div>
                <div class="text-gray-400 text-sm mt-1">{move || vm.get().coords}</div>
            </div>

            // Weather card
            <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
                <span class="text-gray-400 text-sm">"Current Weather"</span>
                <CardRow label="Temperature (°C)" value=Signal::derive(move || vm.get().temp) />
                <CardRow label="Humidity (%)" value=Signal::derive(move || vm.get().humidity) />
                <CardRow label="Wind (km/h)" value=Signal::derive(move || vm.get().wind) />
            </div>

            // Air quality card
            <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
                <span class="text-gray-400 text-sm">"Air Quality (µg/m³)"</span>
                <div class="flex items-center justify-between py-1">
                    <span class="text-gray-400 text-sm">"PM2.5"</span>
                    <span class=move || format!("font-semibold {}", vm.get().pm2_5_class)>
                        {move || vm.get().pm2_5}
                    </span>
                </div>
                <CardRow label="PM10" value=Signal::derive(move || vm.get().pm10) />
                <CardRow label="CO" value=Signal::derive(move || vm.get().co) />
                <CardRow label="O₃" value=Signal::derive(move || vm.get().o3) />
                <CardRow label="NO₂" value=Signal::derive(move || vm.get().no2) />
                <CardRow label="SO₂" value=Signal::derive(move || vm.get().so2) />
            </div>
        </div>
    }
}

/// One labeled value row inside a card
#[component]
fn CardRow(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between py-1">
            <span class="text-gray-400 text-sm">{label}</span>
            <span class="font-semibold">{move || value.get()}</span>
        </div>
    }
}

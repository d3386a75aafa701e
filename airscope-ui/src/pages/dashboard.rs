//! Dashboard Page
//!
//! The whole dashboard: search + comparison forms, favorites, cards, charts,
//! and the map. The comparison section stays mounted and is hidden by style
//! so its canvases always exist when the orchestrator draws into them.

use leptos::*;

use crate::components::chart::{
    ChartCanvas, ChartLegend, COMPARE_PM_CANVAS, COMPARE_TEMP_CANVAS, SERIES_COLORS,
    SINGLE_PM_CANVAS, SINGLE_TEMP_CANVAS,
};
use crate::components::{CityCards, FavoritesList, InlineLoading, LoadingOverlay, MapPanel};
use crate::state::actions;
use crate::state::favorites;
use crate::state::global::{GlobalState, ViewMode};

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Load a default city on mount so the dashboard opens populated
    create_effect(move |_| {
        if state.city_input.get_untracked().is_empty() && !state.has_data.get_untracked() {
            state.city_input.set("Karachi".to_string());
            actions::load_city(state, "Karachi".to_string());
        }
    });

    let on_search = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        actions::load_city(state, state.city_input.get_untracked());
    };

    let on_compare = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        actions::load_comparison(
            state,
            state.compare_a_input.get_untracked(),
            state.compare_b_input.get_untracked(),
        );
    };

    let on_add_favorite = move |_| {
        let city = state.city_input.get_untracked();
        let city = city.trim();
        if !city.is_empty() {
            favorites::add(&state, city);
            state.show_success(&format!("Added {} to favorites", city));
        }
    };

    let on_favorite_select = move |city: String| {
        state.city_input.set(city.clone());
        actions::load_city(state, city);
    };

    view! {
        <LoadingOverlay loading=state.loading>
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-gray-400 mt-1">"Weather and air quality, city by city"</p>
                </div>

                // Reset control - revealed once something is loaded
                {move || {
                    if state.has_data.get() {
                        view! {
                            <button
                                on:click=move |_| actions::reset(state)
                                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg
                                       text-sm font-medium transition-colors"
                            >
                                "Reset"
                            </button>
                        }.into_view()
                    } else {
                        view! {}.into_view()
                    }
                }}
            </div>

            // Search form
            <section class="bg-gray-800 rounded-xl p-6">
                <form on:submit=on_search class="flex flex-wrap gap-2">
                    <input
                        type="text"
                        placeholder="City name"
                        prop:value=move || state.city_input.get()
                        on:input=move |ev| state.city_input.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3 text-white
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        type="submit"
                        disabled=move || state.single_busy.get()
                        class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-semibold transition-colors flex items-center space-x-2"
                    >
                        {move || if state.single_busy.get() {
                            view! { <InlineLoading /> }.into_view()
                        } else {
                            view! { <span>"Load"</span> }.into_view()
                        }}
                    </button>
                    <button
                        type="button"
                        on:click=on_add_favorite
                        class="px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg
                               font-medium transition-colors"
                    >
                        "☆ Favorite"
                    </button>
                </form>
            </section>

            // Favorites
            <section>
                <h2 class="text-lg font-semibold mb-3">"Favorites"</h2>
                <FavoritesList on_select=on_favorite_select />
            </section>

            // Cards
            <CityCards />

            // Single-city charts
            <section class="grid md:grid-cols-2 gap-4">
                <div>
                    <ChartCanvas id=SINGLE_TEMP_CANVAS title="Temperature, last 7 days" />
                    <ChartLegend entries=vec![("Temperature (°C)".to_string(), SERIES_COLORS[0])] />
                </div>
                <div>
                    <ChartCanvas id=SINGLE_PM_CANVAS title="Particulates, last 7 days" />
                    <ChartLegend entries=vec![
                        ("PM2.5 (µg/m³)".to_string(), SERIES_COLORS[0]),
                        ("PM10 (µg/m³)".to_string(), SERIES_COLORS[1]),
                    ] />
                </div>
            </section>

            // Comparison form
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Compare two cities"</h2>
                <form on:submit=on_compare class="flex flex-wrap gap-2">
                    <input
                        type="text"
                        placeholder="First city"
                        prop:value=move || state.compare_a_input.get()
                        on:input=move |ev| state.compare_a_input.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3 text-white
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <input
                        type="text"
                        placeholder="Second city"
                        prop:value=move || state.compare_b_input.get()
                        on:input=move |ev| state.compare_b_input.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-3 text-white
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        type="submit"
                        disabled=move || state.compare_busy.get()
                        class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-semibold transition-colors flex items-center space-x-2"
                    >
                        {move || if state.compare_busy.get() {
                            view! { <InlineLoading /> }.into_view()
                        } else {
                            view! { <span>"Compare"</span> }.into_view()
                        }}
                    </button>
                </form>
            </section>

            // Comparison charts - hidden, not unmounted, outside comparison mode
            <section
                class="grid md:grid-cols-2 gap-4"
                style:display=move || {
                    if state.mode.get() == ViewMode::Comparison {
                        "grid"
                    } else {
                        "none"
                    }
                }
            >
                <div>
                    <ChartCanvas id=COMPARE_TEMP_CANVAS title="Temperature comparison" />
                    {move || state.comparison.get().map(|(a, b)| view! {
                        <ChartLegend entries=vec![
                            (format!("{} Temp (°C)", a.city), SERIES_COLORS[0]),
                            (format!("{} Temp (°C)", b.city), SERIES_COLORS[2]),
                        ] />
                    })}
                </div>
                <div>
                    <ChartCanvas id=COMPARE_PM_CANVAS title="PM2.5 comparison" />
                    {move || state.comparison.get().map(|(a, b)| view! {
                        <ChartLegend entries=vec![
                            (format!("{} PM2.5", a.city), SERIES_COLORS[0]),
                            (format!("{} PM2.5", b.city), SERIES_COLORS[2]),
                        ] />
                    })}
                </div>
            </section>

            // Map
            <MapPanel />
        </div>
        </LoadingOverlay>
    }
}

//! Favorites List Component
//!
//! Renders the persisted favorites. Clicking an entry loads that city;
//! the remove button stops propagation so it never also triggers the load.

use leptos::*;

use crate::state::favorites;
use crate::state::global::GlobalState;

#[component]
pub fn FavoritesList(#[prop(into)] on_select: Callback<String>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div class="flex flex-wrap gap-2">
            {move || {
                let list = state.favorites.get();

                if list.is_empty() {
                    return view! {
                        <p class="text-gray-500 text-sm">"No favorites yet"</p>
                    }
                    .into_view();
                }

                list.into_iter()
                    .map(|city| {
                        let select_city = city.clone();
                        let remove_city = city.clone();

                        view! {
                            <div
                                class="favorite-item flex items-center space-x-2 bg-gray-700
                                       hover:bg-gray-600 rounded-lg px-3 py-2 cursor-pointer
                                       transition-colors"
                                on:click=move |_| on_select.call(select_city.clone())
                            >
                                <span class="text-sm">{city}</span>
                                <button
                                    class="text-gray-400 hover:text-white"
                                    on:click=move |ev| {
                                        // must not also trigger the entry's load
                                        ev.stop_propagation();
                                        favorites::remove(&state, &remove_city);
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

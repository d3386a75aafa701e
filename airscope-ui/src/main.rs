//! AirScope Dashboard
//!
//! Weather & Air Quality Dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Per-city weather and air-quality cards
//! - Hourly temperature and particulate charts (canvas)
//! - Marker map with air-quality coloring
//! - Two-city comparison mode
//! - Persisted favorites list
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the AirScope API over HTTP.

use leptos::*;

mod api;
mod app;
mod components;
mod format;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}

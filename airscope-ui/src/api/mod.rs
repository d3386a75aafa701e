//! API Client
//!
//! HTTP communication with the AirScope backend.

pub mod client;

pub use client::{fetch_city_data, get_api_base, set_api_base, DEFAULT_API_BASE};

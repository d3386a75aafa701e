//! State Management
//!
//! Global application state, the favorites store, and the request
//! orchestrator.

pub mod actions;
pub mod favorites;
pub mod global;

pub use global::{provide_global_state, CityDataPayload, GlobalState, ViewMode};

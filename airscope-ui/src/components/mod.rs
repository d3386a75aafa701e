//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod cards;
pub mod chart;
pub mod favorites;
pub mod loading;
pub mod map;
pub mod toast;

pub use cards::CityCards;
pub use chart::{ChartCanvas, ChartLegend};
pub use favorites::FavoritesList;
pub use loading::{InlineLoading, LoadingOverlay};
pub use map::MapPanel;
pub use toast::Toast;

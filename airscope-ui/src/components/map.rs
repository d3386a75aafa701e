//! Map Controller
//!
//! A marker map drawn on HTML5 Canvas. The tile engine the original layout
//! leaned on is out of scope; this view paints a graticule background and
//! colored markers using Web Mercator projection, and owns the viewport
//! (center + zoom) plus at most one single-city marker and at most two
//! comparison markers.
//!
//! Projection and view-fit math are pure and unit-tested; painting is
//! wasm-gated.

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::format::{classify_pm25, fmt_value, AirQuality};
use crate::state::global::CityDataPayload;

/// Canvas element id for the map
pub const MAP_CANVAS: &str = "map-canvas";

/// Canvas dimensions (match the element attributes)
pub const MAP_WIDTH: f64 = 800.0;
pub const MAP_HEIGHT: f64 = 400.0;

/// Initial view over Pakistan
pub const DEFAULT_CENTER: (f64, f64) = (30.3753, 69.3451);
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Zoom used when focusing a single city
const CITY_ZOOM: f64 = 12.0;
/// Pixel padding kept around fitted comparison bounds
const FIT_PADDING: f64 = 50.0;

/// One map marker with its popup content
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub title: String,
    pub popup: Vec<String>,
    pub severity: Option<AirQuality>,
}

/// The owned map state: viewport plus markers.
///
/// Invariant: at most one single marker and at most two comparison markers,
/// never both kinds at once.
pub struct MapView {
    center: (f64, f64),
    zoom: f64,
    single: Option<Marker>,
    comparison: Vec<Marker>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            single: None,
            comparison: Vec::new(),
        }
    }
}

fn marker_for(payload: &CityDataPayload, with_temp: bool) -> Marker {
    let mut popup = vec![payload.city.clone()];
    if with_temp {
        popup.push(format!("Temp: {}°C", fmt_value(payload.current.temperature_c)));
    }
    popup.push(format!("PM2.5: {} µg/m³", fmt_value(payload.aq_now.pm2_5)));

    Marker {
        lat: payload.coords.lat,
        lon: payload.coords.lon,
        title: payload.city.clone(),
        popup,
        severity: classify_pm25(payload.aq_now.pm2_5),
    }
}

impl MapView {
    /// Replace everything with one marker and focus the viewport on it
    pub fn show_single(&mut self, payload: &CityDataPayload) {
        self.comparison.clear();
        self.single = Some(marker_for(payload, true));
        self.center = (payload.coords.lat, payload.coords.lon);
        self.zoom = CITY_ZOOM;
        self.render();
    }

    /// Replace everything with two markers and fit the viewport to both
    pub fn show_comparison(&mut self, a: &CityDataPayload, b: &CityDataPayload) {
        self.single = None;
        self.comparison = vec![marker_for(a, false), marker_for(b, false)];

        let (center, zoom) = fit_bounds(
            (a.coords.lat, a.coords.lon),
            (b.coords.lat, b.coords.lon),
            MAP_WIDTH,
            MAP_HEIGHT,
            FIT_PADDING,
        );
        self.center = center;
        self.zoom = zoom;
        self.render();
    }

    /// Remove every marker, keeping the current viewport
    pub fn clear_all(&mut self) {
        self.single = None;
        self.comparison.clear();
        self.render();
    }

    pub fn marker_count(&self) -> usize {
        self.single.iter().count() + self.comparison.len()
    }

    pub fn single_marker(&self) -> Option<&Marker> {
        self.single.as_ref()
    }

    pub fn comparison_markers(&self) -> &[Marker] {
        &self.comparison
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Repaint the canvas from current state
    pub fn render(&self) {
        #[cfg(target_arch = "wasm32")]
        paint_map(self);
    }
}

// ============ Web Mercator math ============

/// Project to world pixels at a zoom level (256px world at zoom 0)
fn project(lat: f64, lon: f64, zoom: f64) -> (f64, f64) {
    let size = 256.0 * 2f64.powf(zoom);
    let lat_rad = lat.to_radians();

    let x = (lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0 * size;
    (x, y)
}

/// Inverse of [`project`]
fn unproject(x: f64, y: f64, zoom: f64) -> (f64, f64) {
    let size = 256.0 * 2f64.powf(zoom);

    let lon = x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * y / size);
    let lat = n.sinh().atan().to_degrees();
    (lat, lon)
}

/// Center + zoom that contains both points with `padding` pixels to spare.
///
/// The center is the Mercator midpoint; the zoom is the largest level at
/// which the padded bounds still fit the canvas, clamped to [1, 12].
fn fit_bounds(
    a: (f64, f64),
    b: (f64, f64),
    width: f64,
    height: f64,
    padding: f64,
) -> ((f64, f64), f64) {
    let (ax, ay) = project(a.0, a.1, 0.0);
    let (bx, by) = project(b.0, b.1, 0.0);

    let center = unproject((ax + bx) / 2.0, (ay + by) / 2.0, 0.0);

    let dx = (ax - bx).abs();
    let dy = (ay - by).abs();
    let usable_w = (width - 2.0 * padding).max(1.0);
    let usable_h = (height - 2.0 * padding).max(1.0);

    let zoom = if dx <= f64::EPSILON && dy <= f64::EPSILON {
        CITY_ZOOM
    } else {
        let sx = if dx > f64::EPSILON { usable_w / dx } else { f64::INFINITY };
        let sy = if dy > f64::EPSILON { usable_h / dy } else { f64::INFINITY };
        sx.min(sy).log2().clamp(1.0, CITY_ZOOM)
    };

    (center, zoom)
}

/// The map canvas panel
#[component]
pub fn MapPanel() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-4">
            <h2 class="text-xl font-semibold mb-2">"Map"</h2>
            <canvas
                id=MAP_CANVAS
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
            />
        </section>
    }
}

// ============ Canvas painting (wasm only) ============

#[cfg(target_arch = "wasm32")]
fn paint_map(map: &MapView) {
    let Some(ctx) = map_context() else {
        return;
    };

    let width = MAP_WIDTH;
    let height = MAP_HEIGHT;

    // Background
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let (cx, cy) = project(map.center.0, map.center.1, map.zoom);
    let to_screen = |lat: f64, lon: f64| {
        let (x, y) = project(lat, lon, map.zoom);
        (x - cx + width / 2.0, y - cy + height / 2.0)
    };

    // Graticule every 10 degrees
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);

    for deg in (-180..=180).step_by(10) {
        let (x, _) = to_screen(0.0, deg as f64);
        if (0.0..=width).contains(&x) {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, height);
            ctx.stroke();
        }
    }
    for deg in (-80..=80).step_by(10) {
        let (_, y) = to_screen(deg as f64, 0.0);
        if (0.0..=height).contains(&y) {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(width, y);
            ctx.stroke();
        }
    }

    // Markers
    for marker in map.single.iter().chain(map.comparison.iter()) {
        let (x, y) = to_screen(marker.lat, marker.lon);
        let color = marker.severity.map_or("#9ca3af", AirQuality::color);

        // Pin stem + head
        ctx.set_stroke_style(&color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();
        ctx.move_to(x, y);
        ctx.line_to(x, y - 12.0);
        ctx.stroke();

        ctx.set_fill_style(&color.into());
        ctx.begin_path();
        let _ = ctx.arc(x, y - 16.0, 6.0, 0.0, std::f64::consts::PI * 2.0);
        ctx.fill();

        // Comparison markers get a name tag instead of an open popup
        if map.single.is_none() {
            ctx.set_fill_style(&"#e5e7eb".into()); // gray-200
            ctx.set_font("12px sans-serif");
            let _ = ctx.fill_text(short_name(&marker.title), x + 10.0, y - 16.0);
        }
    }

    // Open popup for the single marker
    if let Some(marker) = &map.single {
        let (x, y) = to_screen(marker.lat, marker.lon);
        paint_popup(&ctx, x, y - 30.0, &marker.popup);
    }
}

#[cfg(target_arch = "wasm32")]
fn map_context() -> Option<web_sys::CanvasRenderingContext2d> {
    web_sys::window()?
        .document()?
        .get_element_by_id(MAP_CANVAS)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .ok()?
        .get_context("2d")
        .ok()??
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .ok()
}

#[cfg(target_arch = "wasm32")]
fn paint_popup(ctx: &web_sys::CanvasRenderingContext2d, x: f64, y: f64, lines: &[String]) {
    let line_height = 16.0;
    let box_width = 180.0;
    let box_height = line_height * lines.len() as f64 + 12.0;
    let top = y - box_height;

    ctx.set_fill_style(&"#111827".into()); // gray-900
    ctx.fill_rect(x - box_width / 2.0, top, box_width, box_height);
    ctx.set_stroke_style(&"#4b5563".into()); // gray-600
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x - box_width / 2.0, top, box_width, box_height);

    ctx.set_fill_style(&"#e5e7eb".into());
    ctx.set_font("12px sans-serif");
    for (i, line) in lines.iter().enumerate() {
        let _ = ctx.fill_text(
            short_name(line),
            x - box_width / 2.0 + 8.0,
            top + 16.0 + i as f64 * line_height,
        );
    }
}

/// Geocoded display names can run long; keep the leading segment
#[cfg(target_arch = "wasm32")]
fn short_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::global::{AirQualityNow, Coords, CurrentWeather, Series};

    fn payload(city: &str, lat: f64, lon: f64, pm2_5: Option<f64>) -> CityDataPayload {
        CityDataPayload {
            city: city.to_string(),
            coords: Coords { lat, lon },
            current: CurrentWeather {
                temperature_c: Some(30.0),
                ..Default::default()
            },
            aq_now: AirQualityNow {
                pm2_5,
                ..Default::default()
            },
            series: Series::default(),
        }
    }

    #[test]
    fn projection_round_trips() {
        for &(lat, lon) in &[(0.0, 0.0), (24.8607, 67.0011), (-33.9, 151.2)] {
            let (x, y) = project(lat, lon, 5.0);
            let (lat2, lon2) = unproject(x, y, 5.0);
            assert!((lat - lat2).abs() < 1e-9);
            assert!((lon - lon2).abs() < 1e-9);
        }
    }

    #[test]
    fn fit_bounds_centers_between_symmetric_points() {
        let ((lat, lon), _) = fit_bounds((10.0, 10.0), (-10.0, -10.0), 800.0, 400.0, 50.0);
        assert!(lat.abs() < 1e-9);
        assert!(lon.abs() < 1e-9);
    }

    #[test]
    fn fit_bounds_zooms_out_for_distant_points() {
        let (_, near) = fit_bounds((24.0, 67.0), (25.0, 68.0), 800.0, 400.0, 50.0);
        let (_, far) = fit_bounds((24.0, 67.0), (45.0, 10.0), 800.0, 400.0, 50.0);
        assert!(near > far);
    }

    #[test]
    fn fit_bounds_identical_points_use_city_zoom() {
        let (center, zoom) = fit_bounds((24.0, 67.0), (24.0, 67.0), 800.0, 400.0, 50.0);
        assert_eq!(zoom, CITY_ZOOM);
        assert!((center.0 - 24.0).abs() < 1e-9);
    }

    #[test]
    fn show_single_owns_exactly_one_marker() {
        let mut map = MapView::default();
        map.show_single(&payload("Karachi", 24.8607, 67.0011, Some(10.0)));

        assert_eq!(map.marker_count(), 1);
        let marker = map.single_marker().unwrap();
        assert_eq!(marker.severity, Some(AirQuality::Good));
        assert!(marker.popup.iter().any(|l| l.contains("PM2.5")));
        assert_eq!(map.center(), (24.8607, 67.0011));
        assert_eq!(map.zoom(), CITY_ZOOM);

        // replacing keeps the count at one
        map.show_single(&payload("Lahore", 31.5204, 74.3587, Some(40.0)));
        assert_eq!(map.marker_count(), 1);
        assert_eq!(map.single_marker().unwrap().severity, Some(AirQuality::Bad));
    }

    #[test]
    fn show_comparison_replaces_single_with_two_markers() {
        let mut map = MapView::default();
        map.show_single(&payload("Karachi", 24.8607, 67.0011, Some(10.0)));
        map.show_comparison(
            &payload("Karachi", 24.8607, 67.0011, Some(10.0)),
            &payload("Lahore", 31.5204, 74.3587, None),
        );

        assert_eq!(map.marker_count(), 2);
        assert!(map.single_marker().is_none());
        assert_eq!(map.comparison_markers()[1].severity, None);

        // repeat comparison never accumulates markers
        map.show_comparison(
            &payload("Karachi", 24.8607, 67.0011, Some(10.0)),
            &payload("Quetta", 30.1798, 66.975, Some(20.0)),
        );
        assert_eq!(map.marker_count(), 2);
    }

    #[test]
    fn clear_all_removes_markers_but_keeps_viewport() {
        let mut map = MapView::default();
        map.show_single(&payload("Karachi", 24.8607, 67.0011, Some(10.0)));
        let view = (map.center(), map.zoom());

        map.clear_all();
        assert_eq!(map.marker_count(), 0);
        assert_eq!((map.center(), map.zoom()), view);
    }
}

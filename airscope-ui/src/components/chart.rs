//! Chart Controller
//!
//! Time-series line charts drawn on HTML5 Canvas.
//!
//! Four canvas slots exist: single-city temperature, single-city particulates,
//! and the two comparison charts. Each slot owns at most one mounted chart;
//! drawing into an occupied slot destroys the old instance first, and
//! `destroy_all` empties every slot. The slot bookkeeping is pure Rust so the
//! lifecycle is testable natively; only painting touches the canvas.

use leptos::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::format::local_time_labels;
use crate::state::global::{CityDataPayload, Series};

/// Chart colors for different series
pub const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

/// Canvas element ids, one per slot
pub const SINGLE_TEMP_CANVAS: &str = "single-temp-chart";
pub const SINGLE_PM_CANVAS: &str = "single-pm-chart";
pub const COMPARE_TEMP_CANVAS: &str = "compare-temp-chart";
pub const COMPARE_PM_CANVAS: &str = "compare-pm-chart";

/// One plotted series
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub color: &'static str,
    pub points: Vec<Option<f64>>,
}

/// A mounted chart: the time axis plus its datasets, bound to one canvas
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    canvas_id: &'static str,
    labels: Vec<String>,
    datasets: Vec<Dataset>,
}

impl LineChart {
    fn new(canvas_id: &'static str, labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            canvas_id,
            labels,
            datasets,
        }
    }

    pub fn canvas_id(&self) -> &'static str {
        self.canvas_id
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Paint this chart onto its canvas (clears first)
    fn render(&self) {
        #[cfg(target_arch = "wasm32")]
        paint_chart(self.canvas_id, &self.labels, &self.datasets);
    }

    /// Blank the canvas this chart occupied
    fn clear(&self) {
        #[cfg(target_arch = "wasm32")]
        clear_canvas(self.canvas_id);
    }
}

/// The four chart ownership slots.
///
/// Invariant: a slot never holds more than one live chart; installing into an
/// occupied slot destroys the previous occupant first.
#[derive(Default)]
pub struct ChartSlots {
    single_temp: Option<LineChart>,
    single_pm: Option<LineChart>,
    compare_temp: Option<LineChart>,
    compare_pm: Option<LineChart>,
}

/// Destroy-then-replace: the only way a chart enters a slot
fn install(slot: &mut Option<LineChart>, chart: LineChart) {
    if let Some(old) = slot.take() {
        old.clear();
    }
    chart.render();
    *slot = Some(chart);
}

fn destroy(slot: &mut Option<LineChart>) {
    if let Some(old) = slot.take() {
        old.clear();
    }
}

impl ChartSlots {
    /// Draw the two single-city charts from one hourly series
    pub fn draw_single(&mut self, series: &Series) {
        let labels = local_time_labels(&series.time);

        install(
            &mut self.single_temp,
            LineChart::new(
                SINGLE_TEMP_CANVAS,
                labels.clone(),
                vec![Dataset {
                    label: "Temperature (°C)".to_string(),
                    color: SERIES_COLORS[0],
                    points: series.temp_c.clone(),
                }],
            ),
        );

        install(
            &mut self.single_pm,
            LineChart::new(
                SINGLE_PM_CANVAS,
                labels,
                vec![
                    Dataset {
                        label: "PM2.5 (µg/m³)".to_string(),
                        color: SERIES_COLORS[0],
                        points: series.pm2_5.clone(),
                    },
                    Dataset {
                        label: "PM10 (µg/m³)".to_string(),
                        color: SERIES_COLORS[1],
                        points: series.pm10.clone(),
                    },
                ],
            ),
        );
    }

    /// Draw the two comparison charts, one dataset per city in each
    pub fn draw_comparison(&mut self, a: &CityDataPayload, b: &CityDataPayload) {
        // Both cities share the first city's time axis, like the original view
        let labels = local_time_labels(&a.series.time);

        install(
            &mut self.compare_temp,
            LineChart::new(
                COMPARE_TEMP_CANVAS,
                labels.clone(),
                vec![
                    Dataset {
                        label: format!("{} Temp (°C)", a.city),
                        color: SERIES_COLORS[0],
                        points: a.series.temp_c.clone(),
                    },
                    Dataset {
                        label: format!("{} Temp (°C)", b.city),
                        color: SERIES_COLORS[2],
                        points: b.series.temp_c.clone(),
                    },
                ],
            ),
        );

        install(
            &mut self.compare_pm,
            LineChart::new(
                COMPARE_PM_CANVAS,
                labels,
                vec![
                    Dataset {
                        label: format!("{} PM2.5", a.city),
                        color: SERIES_COLORS[0],
                        points: a.series.pm2_5.clone(),
                    },
                    Dataset {
                        label: format!("{} PM2.5", b.city),
                        color: SERIES_COLORS[2],
                        points: b.series.pm2_5.clone(),
                    },
                ],
            ),
        );
    }

    /// Destroy the single-city charts (mode switch to comparison)
    pub fn destroy_single(&mut self) {
        destroy(&mut self.single_temp);
        destroy(&mut self.single_pm);
    }

    /// Destroy the comparison charts (mode switch to single)
    pub fn destroy_comparison(&mut self) {
        destroy(&mut self.compare_temp);
        destroy(&mut self.compare_pm);
    }

    /// Destroy every chart (reset)
    pub fn destroy_all(&mut self) {
        self.destroy_single();
        self.destroy_comparison();
    }

    /// Number of live chart instances across all slots
    pub fn live_count(&self) -> usize {
        [
            &self.single_temp,
            &self.single_pm,
            &self.compare_temp,
            &self.compare_pm,
        ]
        .iter()
        .filter(|s| s.is_some())
        .count()
    }

    pub fn single_temp(&self) -> Option<&LineChart> {
        self.single_temp.as_ref()
    }

    pub fn single_pm(&self) -> Option<&LineChart> {
        self.single_pm.as_ref()
    }

    pub fn compare_temp(&self) -> Option<&LineChart> {
        self.compare_temp.as_ref()
    }

    pub fn compare_pm(&self) -> Option<&LineChart> {
        self.compare_pm.as_ref()
    }
}

/// Legend row for a chart: colored dot + series label
#[component]
pub fn ChartLegend(entries: Vec<(String, &'static str)>) -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-2">
            {entries
                .into_iter()
                .map(|(label, color)| {
                    view! {
                        <div class="flex items-center space-x-2">
                            <div
                                class="w-3 h-3 rounded-full"
                                style=format!("background-color: {}", color)
                            />
                            <span class="text-sm text-gray-300">{label}</span>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// A chart canvas with a title
#[component]
pub fn ChartCanvas(id: &'static str, title: &'static str) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-xl p-4">
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            <canvas id=id width="800" height="400" class="w-full h-64 rounded-lg" />
        </div>
    }
}

// ============ Canvas painting (wasm only) ============

#[cfg(target_arch = "wasm32")]
fn canvas_context(
    canvas_id: &str,
) -> Option<(web_sys::HtmlCanvasElement, web_sys::CanvasRenderingContext2d)> {
    let canvas = web_sys::window()?
        .document()?
        .get_element_by_id(canvas_id)?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .ok()?;
    let ctx = canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .ok()?;
    Some((canvas, ctx))
}

#[cfg(target_arch = "wasm32")]
fn clear_canvas(canvas_id: &str) {
    if let Some((canvas, ctx)) = canvas_context(canvas_id) {
        ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    }
}

/// Draw grid, axes, and one polyline per dataset
#[cfg(target_arch = "wasm32")]
fn paint_chart(canvas_id: &str, labels: &[String], datasets: &[Dataset]) {
    let Some((canvas, ctx)) = canvas_context(canvas_id) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 60.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 40.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // Find global min/max for y-axis
    let mut global_min = f64::INFINITY;
    let mut global_max = f64::NEG_INFINITY;

    for dataset in datasets {
        for value in dataset.points.iter().flatten() {
            global_min = global_min.min(*value);
            global_max = global_max.max(*value);
        }
    }

    if !global_min.is_finite() || !global_max.is_finite() {
        // No data at all
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data", width / 2.0 - 30.0, height / 2.0);
        return;
    }

    // Add padding to y range
    let y_range = global_max - global_min;
    let y_padding = if y_range > 0.0 { y_range * 0.1 } else { 1.0 };
    global_min -= y_padding;
    global_max += y_padding;

    // Draw grid lines
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);

    // Horizontal grid lines (5 lines)
    for i in 0..=5 {
        let y = margin_top + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        // Y-axis labels
        let value = global_max - (i as f64 / 5.0) * (global_max - global_min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    let n = labels.len();
    let x_at = |i: usize| {
        if n <= 1 {
            margin_left
        } else {
            margin_left + (i as f64 / (n - 1) as f64) * chart_width
        }
    };
    let y_at =
        |v: f64| margin_top + ((global_max - v) / (global_max - global_min)) * chart_height;

    // Draw each data series; a null sample breaks the polyline
    for dataset in datasets {
        ctx.set_stroke_style(&dataset.color.into());
        ctx.set_line_width(2.0);
        ctx.begin_path();

        let mut pen_down = false;
        for (i, point) in dataset.points.iter().enumerate().take(n) {
            match point {
                Some(v) => {
                    let (x, y) = (x_at(i), y_at(*v));
                    if pen_down {
                        ctx.line_to(x, y);
                    } else {
                        ctx.move_to(x, y);
                        pen_down = true;
                    }
                }
                None => pen_down = false,
            }
        }

        ctx.stroke();
    }

    // Draw x-axis labels (6 evenly spaced ticks)
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");

    if n > 0 {
        let num_ticks = 5;
        for t in 0..=num_ticks {
            let i = (t * (n - 1)) / num_ticks.max(1);
            let _ = ctx.fill_text(&labels[i], x_at(i) - 30.0, height - 10.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series {
        Series {
            time: vec!["2025-08-27T13:00".to_string(), "2025-08-27T14:00".to_string()],
            temp_c: vec![Some(30.9), Some(31.5)],
            pm2_5: vec![Some(40.0), None],
            pm10: vec![Some(85.0), Some(88.0)],
        }
    }

    fn payload(city: &str) -> CityDataPayload {
        CityDataPayload {
            city: city.to_string(),
            coords: crate::state::global::Coords { lat: 0.0, lon: 0.0 },
            current: Default::default(),
            aq_now: Default::default(),
            series: series(),
        }
    }

    #[test]
    fn draw_single_fills_exactly_the_single_slots() {
        let mut slots = ChartSlots::default();
        slots.draw_single(&series());

        assert_eq!(slots.live_count(), 2);
        assert!(slots.single_temp().is_some());
        assert!(slots.single_pm().is_some());
        assert!(slots.compare_temp().is_none());
    }

    #[test]
    fn redraw_replaces_rather_than_stacks() {
        let mut slots = ChartSlots::default();
        slots.draw_single(&series());
        slots.draw_single(&series());
        slots.draw_single(&series());

        // still one instance per slot
        assert_eq!(slots.live_count(), 2);
    }

    #[test]
    fn pm_slot_carries_two_datasets() {
        let mut slots = ChartSlots::default();
        slots.draw_single(&series());

        let pm = slots.single_pm().unwrap();
        assert_eq!(pm.datasets().len(), 2);
        assert_eq!(pm.datasets()[0].label, "PM2.5 (µg/m³)");
        assert_eq!(pm.datasets()[1].label, "PM10 (µg/m³)");
        assert_eq!(pm.canvas_id(), SINGLE_PM_CANVAS);
    }

    #[test]
    fn labels_are_display_formatted() {
        let mut slots = ChartSlots::default();
        slots.draw_single(&series());

        assert_eq!(slots.single_temp().unwrap().labels()[0], "Aug 27, 13:00");
    }

    #[test]
    fn comparison_datasets_are_one_per_city() {
        let mut slots = ChartSlots::default();
        slots.draw_comparison(&payload("Karachi"), &payload("Lahore"));

        assert_eq!(slots.live_count(), 2);
        let temp = slots.compare_temp().unwrap();
        assert_eq!(temp.datasets().len(), 2);
        assert!(temp.datasets()[0].label.starts_with("Karachi"));
        assert!(temp.datasets()[1].label.starts_with("Lahore"));
    }

    #[test]
    fn mode_switch_keeps_at_most_one_chart_per_slot() {
        let mut slots = ChartSlots::default();
        slots.draw_single(&series());
        slots.destroy_single();
        slots.draw_comparison(&payload("A"), &payload("B"));

        assert_eq!(slots.live_count(), 2);
        assert!(slots.single_temp().is_none());
        assert!(slots.single_pm().is_none());

        slots.destroy_comparison();
        slots.draw_single(&series());
        assert_eq!(slots.live_count(), 2);
        assert!(slots.compare_temp().is_none());
    }

    #[test]
    fn destroy_all_empties_every_slot() {
        let mut slots = ChartSlots::default();
        slots.draw_single(&series());
        slots.draw_comparison(&payload("A"), &payload("B"));
        assert_eq!(slots.live_count(), 4);

        slots.destroy_all();
        assert_eq!(slots.live_count(), 0);

        // idempotent
        slots.destroy_all();
        assert_eq!(slots.live_count(), 0);
    }
}

//! Display Formatting
//!
//! Pure view logic: air-quality classification, time-axis labels, and the
//! placeholder formatting shared by cards, charts, and map popups.

use chrono::NaiveDateTime;

/// Placeholder shown for any missing value
pub const PLACEHOLDER: &str = "—";

/// US-EPA-style PM2.5 bands driving text and marker colors.
///
/// Bounds are inclusive: exactly 12.0 is still `Good`, exactly 35.4 is still
/// `Moderate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AirQuality {
    Good,
    Moderate,
    Bad,
}

impl AirQuality {
    /// CSS class carried by the PM2.5 card slot and marker icons
    pub fn css_class(self) -> &'static str {
        match self {
            AirQuality::Good => "good",
            AirQuality::Moderate => "moderate",
            AirQuality::Bad => "bad",
        }
    }

    /// Marker/chart accent color
    pub fn color(self) -> &'static str {
        match self {
            AirQuality::Good => "#4CAF50",
            AirQuality::Moderate => "#FF9800",
            AirQuality::Bad => "#F44336",
        }
    }
}

/// Classify a PM2.5 reading; `None` means "no reading", not "clean air"
pub fn classify_pm25(pm25: Option<f64>) -> Option<AirQuality> {
    let v = pm25?;
    Some(if v <= 12.0 {
        AirQuality::Good
    } else if v <= 35.4 {
        AirQuality::Moderate
    } else {
        AirQuality::Bad
    })
}

/// Class string for the PM2.5 slot: empty when there is no reading
pub fn aqi_class(pm25: Option<f64>) -> &'static str {
    classify_pm25(pm25).map_or("", AirQuality::css_class)
}

/// Format one upstream timestamp ("2025-08-27T14:00", already local time per
/// `timezone=auto`) as "Aug 27, 14:00". Unparseable input is passed through
/// unchanged so labels stay positionally aligned with the series arrays.
pub fn local_label(iso: &str) -> String {
    NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S"))
        .map(|dt| dt.format("%b %d, %H:%M").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// Map a whole time axis to display labels; empty in, empty out
pub fn local_time_labels(times: &[String]) -> Vec<String> {
    times.iter().map(|t| local_label(t)).collect()
}

/// A value or the placeholder
pub fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => PLACEHOLDER.to_string(),
    }
}

/// "Lat 24.861, Lon 67.001" - three decimal places
pub fn fmt_coords(lat: f64, lon: f64) -> String {
    format!("Lat {lat:.3}, Lon {lon:.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_none_is_none() {
        assert_eq!(classify_pm25(None), None);
        assert_eq!(aqi_class(None), "");
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        assert_eq!(classify_pm25(Some(0.0)), Some(AirQuality::Good));
        assert_eq!(classify_pm25(Some(12.0)), Some(AirQuality::Good));
        assert_eq!(classify_pm25(Some(12.1)), Some(AirQuality::Moderate));
        assert_eq!(classify_pm25(Some(35.4)), Some(AirQuality::Moderate));
        assert_eq!(classify_pm25(Some(35.5)), Some(AirQuality::Bad));
        assert_eq!(classify_pm25(Some(250.0)), Some(AirQuality::Bad));
    }

    #[test]
    fn classify_drives_css_class() {
        assert_eq!(aqi_class(Some(10.0)), "good");
        assert_eq!(aqi_class(Some(20.0)), "moderate");
        assert_eq!(aqi_class(Some(40.0)), "bad");
    }

    #[test]
    fn labels_render_short_month_day_time() {
        assert_eq!(local_label("2025-08-27T14:00"), "Aug 27, 14:00");
        assert_eq!(local_label("2025-01-03T09:30:00"), "Jan 03, 09:30");
    }

    #[test]
    fn unparseable_labels_pass_through() {
        assert_eq!(local_label("not-a-time"), "not-a-time");
    }

    #[test]
    fn empty_axis_yields_empty_labels() {
        assert!(local_time_labels(&[]).is_empty());
    }

    #[test]
    fn axis_labels_keep_positional_alignment() {
        let times = vec![
            "2025-08-27T13:00".to_string(),
            "garbled".to_string(),
            "2025-08-27T15:00".to_string(),
        ];
        let labels = local_time_labels(&times);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1], "garbled");
    }

    #[test]
    fn values_fall_back_to_placeholder() {
        assert_eq!(fmt_value(Some(10.0)), "10");
        assert_eq!(fmt_value(Some(31.5)), "31.5");
        assert_eq!(fmt_value(None), PLACEHOLDER);
    }

    #[test]
    fn coords_use_three_decimals() {
        assert_eq!(fmt_coords(24.8607, 67.0011), "Lat 24.861, Lon 67.001");
    }
}

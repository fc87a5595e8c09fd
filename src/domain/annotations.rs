// Reference constants overlaid on the chart by the presenter
use serde::Serialize;

pub const THRESHOLD_PERCENT: f64 = 50.0;
pub const THRESHOLD_LABEL: &str = "50% Threshold";

/// 2024-11-05T00:00:00Z, US general election day.
pub const EVENT_MARKER_MS: i64 = 1_730_764_800_000;
pub const EVENT_MARKER_LABEL: &str = "Election Day";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotations {
    pub threshold_percent: f64,
    pub threshold_label: &'static str,
    pub event_marker: i64,
    pub event_marker_label: &'static str,
}

impl Annotations {
    pub fn reference() -> Self {
        Self {
            threshold_percent: THRESHOLD_PERCENT,
            threshold_label: THRESHOLD_LABEL,
            event_marker: EVENT_MARKER_MS,
            event_marker_label: EVENT_MARKER_LABEL,
        }
    }
}

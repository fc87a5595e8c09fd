// Trailing-window selection anchored at the current wall-clock time
use crate::domain::error::TrendError;
use crate::domain::snapshot::ChartPoint;
use chrono::{DateTime, TimeDelta, Utc};

pub const MIN_WINDOW_DAYS: u32 = 5;

/// Clamps a requested window to `[MIN_WINDOW_DAYS, total_days]`.
/// With fewer than `MIN_WINDOW_DAYS` distinct days the lower bound wins.
pub fn clamp_window_size(requested: u32, total_days: usize) -> u32 {
    let upper = u32::try_from(total_days)
        .unwrap_or(u32::MAX)
        .max(MIN_WINDOW_DAYS);
    requested.clamp(MIN_WINDOW_DAYS, upper)
}

/// Keeps the points with `timestamp >= now - days`. `points` must be ascending.
pub fn window_series(
    points: &[ChartPoint],
    days: u32,
    now: DateTime<Utc>,
) -> Result<Vec<ChartPoint>, TrendError> {
    let cutoff = (now - TimeDelta::days(i64::from(days))).timestamp_millis();
    let start = points.partition_point(|p| p.timestamp_ms < cutoff);

    if start == points.len() {
        return Err(TrendError::EmptyWindow { days });
    }

    Ok(points[start..].to_vec())
}

// Decoder for the snapshot JSON payload
use crate::domain::calendar::CalendarZone;
use crate::domain::error::TrendError;
use crate::domain::snapshot::Snapshot;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    timestamp: String,
    win_probabilities: BTreeMap<String, f64>,
}

/// Decodes `[{"timestamp": ..., "win_probabilities": {...}}, ...]`.
/// Offset-less timestamps are read as wall-clock time in `zone`.
pub fn decode_snapshots(bytes: &[u8], zone: &CalendarZone) -> Result<Vec<Snapshot>, TrendError> {
    let raw: Vec<RawSnapshot> =
        serde_json::from_slice(bytes).map_err(|e| TrendError::Parse(e.to_string()))?;

    if raw.is_empty() {
        return Err(TrendError::EmptyData);
    }

    raw.into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let instant = parse_timestamp(&r.timestamp, zone).ok_or_else(|| {
                TrendError::Parse(format!(
                    "element {}: invalid timestamp '{}'",
                    idx, r.timestamp
                ))
            })?;
            Ok(Snapshot::new(instant, r.win_probabilities))
        })
        .collect()
}

fn parse_timestamp(value: &str, zone: &CalendarZone) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return zone.resolve_naive(naive);
    }

    // Date-only forms are UTC midnight, as browsers read them
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

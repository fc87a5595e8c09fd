// Locale-independent labels for dates and percentages
use crate::domain::calendar::CalendarZone;
use crate::domain::entity::Entity;
use crate::domain::snapshot::ChartPoint;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const DATE_FORMAT: &str = "%b %-d, %Y";

/// Renders an epoch-millis instant as `"Sep 10, 2024"` in UTC.
pub fn format_date(timestamp_ms: i64) -> String {
    format_date_in(timestamp_ms, &Utc)
}

/// Same as [`format_date`], using the calendar date in `tz`.
/// Month names are always English; chrono does not consult the process locale.
pub fn format_date_in<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(instant) => instant.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => "Invalid Date".to_string(),
    }
}

pub fn format_date_in_zone(timestamp_ms: i64, zone: &CalendarZone) -> String {
    match zone {
        CalendarZone::Local => format_date_in(timestamp_ms, &Local),
        CalendarZone::Fixed(offset) => format_date_in(timestamp_ms, offset),
    }
}

/// Two decimals and a `%` sign. Rounds half away from zero at the second
/// decimal, so `12.125` becomes `"12.13%"`.
pub fn format_percentage(value: f64) -> String {
    // adding 0.0 folds -0.0 into 0.0
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{rounded:.2}%")
}

/// Tooltip text for one point: the date, then `"<label>: <percent>"` per
/// entity. Entities without a value on that day are skipped; with no
/// configured entities every key of the point is listed under its id.
pub fn format_tooltip(point: &ChartPoint, entities: &[Entity], zone: &CalendarZone) -> String {
    let mut lines = vec![format_date_in_zone(point.timestamp_ms, zone)];

    if entities.is_empty() {
        for (id, value) in &point.percentages {
            lines.push(format!("{}: {}", id, format_percentage(*value)));
        }
    } else {
        for entity in entities {
            if let Some(value) = point.percentage(&entity.id) {
                lines.push(format!("{}: {}", entity.label, format_percentage(value)));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_date() {
        let ms = DateTime::parse_from_rfc3339("2024-09-10T00:00:00Z")
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_date(ms), "Sep 10, 2024");
        assert_eq!(format_date(1_725_148_800_000), "Sep 1, 2024");
    }

    #[test]
    fn test_format_date_in_offset() {
        let west = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(format_date_in(1_725_926_400_000, &west), "Sep 9, 2024");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.4321 * 100.0), "43.21%");
        assert_eq!(format_percentage(50.0), "50.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(100.0), "100.00%");
    }

    #[test]
    fn test_format_percentage_rounds_half_up() {
        // 12.125 and 0.125 are exact in binary
        assert_eq!(format_percentage(12.125), "12.13%");
        assert_eq!(format_percentage(0.125), "0.13%");
        assert_eq!(format_percentage(99.994), "99.99%");
        assert_eq!(format_percentage(99.996), "100.00%");
    }

    #[test]
    fn test_format_percentage_no_negative_zero() {
        assert_eq!(format_percentage(-0.001), "0.00%");
    }

    #[test]
    fn test_tooltip_uses_labels() {
        let point = ChartPoint::new(
            1_725_148_800_000,
            [("a".to_string(), 55.0), ("b".to_string(), 45.0)].into(),
        );
        let entities = vec![
            Entity::new("b".into(), "Bravo".into(), None),
            Entity::new("a".into(), "Alpha".into(), Some("red".into())),
            Entity::new("c".into(), "Charlie".into(), None),
        ];

        let text = format_tooltip(&point, &entities, &CalendarZone::utc());

        assert_eq!(text, "Sep 1, 2024\nBravo: 45.00%\nAlpha: 55.00%");
    }

    #[test]
    fn test_tooltip_without_entities_lists_ids() {
        let point = ChartPoint::new(1_725_148_800_000, [("a".to_string(), 12.125)].into());

        let text = format_tooltip(&point, &[], &CalendarZone::utc());

        assert_eq!(text, "Sep 1, 2024\na: 12.13%");
    }
}

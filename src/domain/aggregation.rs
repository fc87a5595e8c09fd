// Daily aggregation of raw snapshots into the chart series
use crate::domain::calendar::CalendarZone;
use crate::domain::snapshot::{ChartPoint, DailyAggregate, Snapshot};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Groups snapshots by calendar day in `zone` and emits one point per day,
/// each entity's value being the mean of that day's fractions times 100.
/// Output is sorted ascending by timestamp regardless of input order.
pub fn aggregate_daily(snapshots: &[Snapshot], zone: &CalendarZone) -> Vec<ChartPoint> {
    let mut days: HashMap<NaiveDate, DailyAggregate> = HashMap::new();

    for snapshot in snapshots {
        let day_key = zone.day_key(snapshot.instant);
        days.entry(day_key)
            .or_insert_with(|| DailyAggregate::new(day_key))
            .add(snapshot);
    }

    let mut points: Vec<ChartPoint> = days
        .into_values()
        .map(|aggregate| {
            ChartPoint::new(
                zone.start_of_day(aggregate.day_key).timestamp_millis(),
                aggregate.percentages(),
            )
        })
        .collect();

    points.sort_by_key(|p| p.timestamp_ms);

    tracing::debug!(
        "Aggregated {} snapshots into {} daily points",
        snapshots.len(),
        points.len()
    );

    points
}

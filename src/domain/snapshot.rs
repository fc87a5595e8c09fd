// Snapshot and chart point domain models
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

pub type EntityId = String;

/// One raw probability reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub instant: DateTime<Utc>,
    pub probabilities: BTreeMap<EntityId, f64>,
}

impl Snapshot {
    pub fn new(instant: DateTime<Utc>, probabilities: BTreeMap<EntityId, f64>) -> Self {
        Self {
            instant,
            probabilities,
        }
    }
}

/// Keeps only the probabilities of `tracked` entities. An empty `tracked`
/// keeps everything. Snapshots left with no tracked entity are dropped.
pub fn retain_tracked(snapshots: Vec<Snapshot>, tracked: &[EntityId]) -> Vec<Snapshot> {
    if tracked.is_empty() {
        return snapshots;
    }

    snapshots
        .into_iter()
        .filter_map(|mut snapshot| {
            snapshot
                .probabilities
                .retain(|entity, _| tracked.contains(entity));
            (!snapshot.probabilities.is_empty()).then_some(snapshot)
        })
        .collect()
}

/// Per-day running sums. Each entity keeps its own sample count so a
/// snapshot missing an entity does not drag that entity's mean down.
#[derive(Debug, Clone)]
pub struct DailyAggregate {
    pub day_key: NaiveDate,
    pub sums: BTreeMap<EntityId, f64>,
    pub samples: BTreeMap<EntityId, u32>,
    pub count: u32,
}

impl DailyAggregate {
    pub fn new(day_key: NaiveDate) -> Self {
        Self {
            day_key,
            sums: BTreeMap::new(),
            samples: BTreeMap::new(),
            count: 0,
        }
    }

    pub fn add(&mut self, snapshot: &Snapshot) {
        self.count += 1;
        for (entity, fraction) in &snapshot.probabilities {
            *self.sums.entry(entity.clone()).or_insert(0.0) += fraction;
            *self.samples.entry(entity.clone()).or_insert(0) += 1;
        }
    }

    /// Mean fraction per entity, scaled to percent.
    pub fn percentages(&self) -> BTreeMap<EntityId, f64> {
        self.sums
            .iter()
            .map(|(entity, sum)| {
                let samples = self.samples.get(entity).copied().unwrap_or(1).max(1);
                (entity.clone(), sum / f64::from(samples) * 100.0)
            })
            .collect()
    }
}

/// One point of the chart-ready series, serialized flat as
/// `{"timestamp": <millis>, "<entity>": <percent>, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    #[serde(flatten)]
    pub percentages: BTreeMap<EntityId, f64>,
}

impl ChartPoint {
    pub fn new(timestamp_ms: i64, percentages: BTreeMap<EntityId, f64>) -> Self {
        Self {
            timestamp_ms,
            percentages,
        }
    }

    pub fn percentage(&self, entity: &str) -> Option<f64> {
        self.percentages.get(entity).copied()
    }
}

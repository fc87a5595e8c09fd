// Response model for the trend endpoint
use crate::application::trend_session::{SessionState, TrendSeries};
use crate::domain::annotations::Annotations;
use crate::domain::calendar::CalendarZone;
use crate::domain::entity::Entity;
use crate::domain::format::{format_date_in_zone, format_percentage, format_tooltip};
use crate::domain::snapshot::{ChartPoint, EntityId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Display strings for one chart point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLabels {
    pub timestamp: i64,
    pub date: String,
    pub percentages: BTreeMap<EntityId, String>,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendView {
    Idle,
    Loading,
    Ready {
        window_days: u32,
        total_days: usize,
        points: Vec<ChartPoint>,
        labels: Vec<PointLabels>,
        entities: Vec<Entity>,
        annotations: Annotations,
    },
    Error {
        kind: &'static str,
        message: String,
    },
}

impl TrendView {
    pub fn from_state(state: SessionState, entities: &[Entity], zone: &CalendarZone) -> Self {
        match state {
            SessionState::Idle => TrendView::Idle,
            SessionState::Loading => TrendView::Loading,
            SessionState::Ready(series) => Self::ready(series, entities, zone),
            SessionState::Error(e) => TrendView::Error {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }

    fn ready(series: TrendSeries, entities: &[Entity], zone: &CalendarZone) -> Self {
        let labels = series
            .points
            .iter()
            .map(|p| PointLabels {
                timestamp: p.timestamp_ms,
                date: format_date_in_zone(p.timestamp_ms, zone),
                percentages: p
                    .percentages
                    .iter()
                    .map(|(id, v)| (id.clone(), format_percentage(*v)))
                    .collect(),
                tooltip: format_tooltip(p, entities, zone),
            })
            .collect();

        TrendView::Ready {
            window_days: series.window_days,
            total_days: series.total_days,
            points: series.points,
            labels,
            entities: entities.to_vec(),
            annotations: Annotations::reference(),
        }
    }
}

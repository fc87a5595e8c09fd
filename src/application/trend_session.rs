// Trend session - Owns the loaded snapshots and window size, derives the series
use crate::application::clock::Clock;
use crate::domain::aggregation::aggregate_daily;
use crate::domain::calendar::CalendarZone;
use crate::domain::error::TrendError;
use crate::domain::format::format_date;
use crate::domain::snapshot::{retain_tracked, ChartPoint, EntityId, Snapshot};
use crate::domain::window::{clamp_window_size, window_series};
use std::sync::Arc;

/// Windowed series ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub window_days: u32,
    pub total_days: usize,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready(TrendSeries),
    Error(TrendError),
}

/// Issued by [`TrendSession::begin_load`]; only the latest ticket may complete.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
}

pub struct TrendSession {
    clock: Arc<dyn Clock>,
    zone: CalendarZone,
    tracked: Vec<EntityId>,
    requested_days: u32,
    snapshots: Vec<Snapshot>,
    daily: Vec<ChartPoint>,
    state: SessionState,
    generation: u64,
    torn_down: bool,
}

impl TrendSession {
    pub fn new(clock: Arc<dyn Clock>, zone: CalendarZone, requested_days: u32) -> Self {
        Self {
            clock,
            zone,
            tracked: Vec::new(),
            requested_days,
            snapshots: Vec::new(),
            daily: Vec::new(),
            state: SessionState::Idle,
            generation: 0,
            torn_down: false,
        }
    }

    /// Restricts the series to these entity ids. Empty tracks every key.
    pub fn tracking(mut self, tracked: Vec<EntityId>) -> Self {
        self.tracked = tracked;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[cfg(test)]
    pub fn requested_days(&self) -> u32 {
        self.requested_days
    }

    #[cfg(test)]
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Enters `Loading`. Returns `None` while a load is outstanding or after teardown.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.torn_down || matches!(self.state, SessionState::Loading) {
            return None;
        }

        self.generation += 1;
        self.state = SessionState::Loading;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Applies a fetch result. Returns `false` when the result was discarded
    /// because the session was torn down or the ticket is stale.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Snapshot>, TrendError>,
    ) -> bool {
        if self.torn_down || ticket.generation != self.generation {
            tracing::debug!(
                "Discarding load result for generation {} (current {}, torn down: {})",
                ticket.generation,
                self.generation,
                self.torn_down
            );
            return false;
        }

        match result.map(|snapshots| retain_tracked(snapshots, &self.tracked)) {
            Ok(snapshots) if snapshots.is_empty() => self.fail(TrendError::EmptyData),
            Ok(snapshots) => {
                self.daily = aggregate_daily(&snapshots, &self.zone);
                self.snapshots = snapshots;
                if let (Some(first), Some(last)) = (self.daily.first(), self.daily.last()) {
                    tracing::info!(
                        "Loaded {} snapshots spanning {} days ({} to {})",
                        self.snapshots.len(),
                        self.daily.len(),
                        format_date(first.timestamp_ms),
                        format_date(last.timestamp_ms)
                    );
                }
                self.recompute();
            }
            Err(e) => self.fail(e),
        }

        true
    }

    /// Records a new window size and re-derives the series from the cached
    /// snapshots without refetching.
    pub fn set_window_size(&mut self, days: u32) {
        if self.torn_down {
            return;
        }

        self.requested_days = days;
        if !matches!(self.state, SessionState::Loading) && !self.daily.is_empty() {
            self.recompute();
        }
    }

    /// Drops owned data. Nothing mutates the session afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.snapshots.clear();
        self.daily.clear();
        self.state = SessionState::Idle;
    }

    fn fail(&mut self, error: TrendError) {
        tracing::warn!("Load failed ({}): {}", error.kind(), error);
        self.snapshots.clear();
        self.daily.clear();
        self.state = SessionState::Error(error);
    }

    fn recompute(&mut self) {
        let total_days = self.daily.len();
        let window_days = clamp_window_size(self.requested_days, total_days);

        self.state = match window_series(&self.daily, window_days, self.clock.now()) {
            Ok(points) => SessionState::Ready(TrendSeries {
                window_days,
                total_days,
                points,
            }),
            Err(e) => SessionState::Error(e),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::FixedClock;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 20, 12, 0, 0).unwrap()
    }

    // One reading per day for `days` days ending on the day of `now()`
    fn daily_snapshots(days: i64) -> Vec<Snapshot> {
        (0..days)
            .map(|offset| {
                let instant = now() - Duration::days(offset);
                Snapshot::new(
                    instant,
                    [("A".to_string(), 0.5), ("B".to_string(), 0.5)].into(),
                )
            })
            .collect()
    }

    fn session(requested_days: u32) -> TrendSession {
        TrendSession::new(Arc::new(FixedClock(now())), CalendarZone::utc(), requested_days)
    }

    fn ready(session: &TrendSession) -> &TrendSeries {
        match session.state() {
            SessionState::Ready(series) => series,
            other => panic!("expected ready state, got {:?}", other),
        }
    }

    #[test]
    fn test_idle_to_ready() {
        let mut session = session(7);
        assert_eq!(session.state(), &SessionState::Idle);

        let ticket = session.begin_load().unwrap();
        assert_eq!(session.state(), &SessionState::Loading);

        assert!(session.complete_load(ticket, Ok(daily_snapshots(20))));

        let series = ready(&session);
        assert_eq!(series.window_days, 7);
        assert_eq!(series.total_days, 20);
        assert_eq!(series.points.len(), 7);
    }

    #[test]
    fn test_untracked_entities_left_out_of_series() {
        let snapshots = vec![Snapshot::new(
            now(),
            [
                ("A".to_string(), 0.4),
                ("B".to_string(), 0.5),
                ("Other".to_string(), 0.1),
            ]
            .into(),
        )];
        let mut session = session(7).tracking(vec!["A".to_string(), "B".to_string()]);
        let ticket = session.begin_load().unwrap();

        session.complete_load(ticket, Ok(snapshots));

        let point = &ready(&session).points[0];
        assert_eq!(point.percentages.len(), 2);
        assert!((point.percentage("A").unwrap() - 40.0).abs() < 1e-9);
        assert!((point.percentage("B").unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(point.percentage("Other"), None);
    }

    #[test]
    fn test_only_untracked_entities_is_empty_data() {
        let snapshots = vec![Snapshot::new(now(), [("Other".to_string(), 0.1)].into())];
        let mut session = session(7).tracking(vec!["A".to_string()]);
        let ticket = session.begin_load().unwrap();

        session.complete_load(ticket, Ok(snapshots));

        assert_eq!(session.state(), &SessionState::Error(TrendError::EmptyData));
    }

    #[test]
    fn test_overlapping_load_refused() {
        let mut session = session(7);
        let _ticket = session.begin_load().unwrap();

        assert!(session.begin_load().is_none());
    }

    #[test]
    fn test_error_result_enters_error_state() {
        let mut session = session(7);
        let ticket = session.begin_load().unwrap();

        session.complete_load(ticket, Err(TrendError::Network("refused".into())));

        assert_eq!(
            session.state(),
            &SessionState::Error(TrendError::Network("refused".into()))
        );
    }

    #[test]
    fn test_empty_result_is_empty_data() {
        let mut session = session(7);
        let ticket = session.begin_load().unwrap();

        session.complete_load(ticket, Ok(Vec::new()));

        assert_eq!(session.state(), &SessionState::Error(TrendError::EmptyData));
    }

    #[test]
    fn test_window_change_recomputes_without_loading() {
        let mut session = session(7);
        let ticket = session.begin_load().unwrap();
        session.complete_load(ticket, Ok(daily_snapshots(20)));

        session.set_window_size(12);
        assert_eq!(ready(&session).points.len(), 12);

        session.set_window_size(1);
        assert_eq!(ready(&session).window_days, 5);

        session.set_window_size(400);
        let series = ready(&session);
        assert_eq!(series.window_days, 20);
        assert_eq!(series.points.len(), 20);
        assert_eq!(session.snapshot_count(), 20);
    }

    #[test]
    fn test_stale_data_gives_empty_window() {
        let old: Vec<Snapshot> = daily_snapshots(3)
            .into_iter()
            .map(|s| Snapshot::new(s.instant - Duration::days(60), s.probabilities))
            .collect();
        let mut session = session(7);
        let ticket = session.begin_load().unwrap();

        session.complete_load(ticket, Ok(old));

        assert_eq!(
            session.state(),
            &SessionState::Error(TrendError::EmptyWindow { days: 5 })
        );
    }

    #[test]
    fn test_result_after_teardown_discarded() {
        let mut session = session(7);
        let ticket = session.begin_load().unwrap();

        session.teardown();
        let applied = session.complete_load(ticket, Ok(daily_snapshots(10)));

        assert!(!applied);
        assert_eq!(session.state(), &SessionState::Idle);
        assert_eq!(session.snapshot_count(), 0);
        assert!(session.begin_load().is_none());
    }

    #[test]
    fn test_window_change_after_teardown_ignored() {
        let mut session = session(7);
        session.teardown();

        session.set_window_size(10);

        assert_eq!(session.requested_days(), 7);
    }

    #[test]
    fn test_reload_after_error() {
        let mut session = session(7);
        let ticket = session.begin_load().unwrap();
        session.complete_load(ticket, Err(TrendError::Parse("bad".into())));

        let ticket = session.begin_load().unwrap();
        session.complete_load(ticket, Ok(daily_snapshots(8)));

        assert_eq!(ready(&session).points.len(), 7);
    }
}

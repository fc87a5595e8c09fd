// Session controller - Runs loads against the source without holding the session lock
use crate::application::snapshot_source::SnapshotSource;
use crate::application::trend_session::{SessionState, TrendSession};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// Session was torn down (or superseded) while the fetch was outstanding.
    Discarded,
}

#[derive(Clone)]
pub struct SessionController {
    session: Arc<Mutex<TrendSession>>,
    source: Arc<dyn SnapshotSource>,
}

impl SessionController {
    pub fn new(session: TrendSession, source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            source,
        }
    }

    /// Starts a load in the background. Returns `None` if one is already
    /// running or the session is gone.
    pub async fn start_load(&self) -> Option<JoinHandle<LoadOutcome>> {
        let ticket = self.session.lock().await.begin_load()?;
        let session = self.session.clone();
        let source = self.source.clone();

        tracing::info!("Fetching snapshots from {}", source.describe());

        Some(tokio::spawn(async move {
            let start_time = Instant::now();
            let result = source.fetch_snapshots().await;
            tracing::debug!("Fetch finished in {:?}", start_time.elapsed());

            let mut session = session.lock().await;
            if session.complete_load(ticket, result) {
                LoadOutcome::Applied
            } else {
                LoadOutcome::Discarded
            }
        }))
    }

    /// Runs a load to completion. `None` when a load could not be started.
    #[cfg(test)]
    pub async fn load(&self) -> Option<LoadOutcome> {
        let handle = self.start_load().await?;
        match handle.await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!("Load task failed: {}", e);
                None
            }
        }
    }

    pub async fn set_window_size(&self, days: u32) {
        self.session.lock().await.set_window_size(days);
    }

    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state().clone()
    }

    pub async fn teardown(&self) {
        self.session.lock().await.teardown();
        tracing::info!("Trend session torn down");
    }
}

// Port for retrieving the raw snapshot collection
use crate::domain::error::TrendError;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch every snapshot once. A non-empty list on success; otherwise
    /// `Network`, `Parse` or `EmptyData`. Implementations never retry.
    async fn fetch_snapshots(&self) -> Result<Vec<Snapshot>, TrendError>;

    /// Where the snapshots come from, for logs.
    fn describe(&self) -> String;
}

// Local file snapshot source
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::calendar::CalendarZone;
use crate::domain::error::TrendError;
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::snapshot_decoder::decode_snapshots;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct FileSnapshotSource {
    path: PathBuf,
    zone: CalendarZone,
}

impl FileSnapshotSource {
    pub fn new(path: PathBuf, zone: CalendarZone) -> Self {
        Self { path, zone }
    }
}

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch_snapshots(&self) -> Result<Vec<Snapshot>, TrendError> {
        let bytes = fs::read(&self.path).await.map_err(|e| {
            TrendError::Network(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        decode_snapshots(&bytes, &self.zone)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("win_trend_{}_{}.json", std::process::id(), name));
        path
    }

    #[tokio::test]
    async fn test_reads_file() {
        let path = temp_path("ok");
        fs::write(
            &path,
            r#"[{"timestamp": "2024-09-01T00:00:00Z", "win_probabilities": {"A": 0.5}}]"#,
        )
        .await
        .unwrap();

        let result = FileSnapshotSource::new(path.clone(), CalendarZone::utc())
            .fetch_snapshots()
            .await;
        let _ = fs::remove_file(&path).await;

        assert_eq!(result.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_network_error() {
        let source = FileSnapshotSource::new(temp_path("missing"), CalendarZone::utc());

        let result = source.fetch_snapshots().await;

        assert!(matches!(result, Err(TrendError::Network(_))));
    }
}

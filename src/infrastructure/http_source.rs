// HTTP snapshot source
use crate::application::snapshot_source::SnapshotSource;
use crate::domain::calendar::CalendarZone;
use crate::domain::error::TrendError;
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::snapshot_decoder::decode_snapshots;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpSnapshotSource {
    url: String,
    zone: CalendarZone,
    client: reqwest::Client,
}

impl HttpSnapshotSource {
    pub fn new(url: String, zone: CalendarZone) -> Self {
        Self {
            url,
            zone,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SnapshotSource for HttpSnapshotSource {
    async fn fetch_snapshots(&self) -> Result<Vec<Snapshot>, TrendError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| TrendError::Network(format!("request to {} failed: {}", self.url, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!("Snapshot source {} answered {}", self.url, status);
            return Err(TrendError::Network(format!(
                "{} responded with status {}",
                self.url, status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TrendError::Network(format!("failed to read body: {}", e)))?;

        tracing::debug!("Received {} bytes from {}", body.len(), self.url);
        decode_snapshots(&body, &self.zone)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// Error taxonomy surfaced to the presenter
use thiserror::Error;

/// Terminal failures of a load attempt. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrendError {
    /// Source unreachable or answered with a non-success status.
    #[error("snapshot source unavailable: {0}")]
    Network(String),

    /// Payload was not a list of snapshots.
    #[error("failed to parse snapshots: {0}")]
    Parse(String),

    /// Payload decoded but held no snapshots.
    #[error("snapshot source returned no data")]
    EmptyData,

    /// Snapshots exist but none fall inside the trailing window.
    #[error("no data in the last {days} days")]
    EmptyWindow { days: u32 },
}

impl TrendError {
    /// Stable tag used in API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            TrendError::Network(_) => "network_error",
            TrendError::Parse(_) => "parse_error",
            TrendError::EmptyData => "empty_data",
            TrendError::EmptyWindow { .. } => "empty_window",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags() {
        assert_eq!(TrendError::Network("refused".into()).kind(), "network_error");
        assert_eq!(TrendError::Parse("eof".into()).kind(), "parse_error");
        assert_eq!(TrendError::EmptyData.kind(), "empty_data");
        assert_eq!(TrendError::EmptyWindow { days: 5 }.kind(), "empty_window");
    }

    #[test]
    fn test_empty_window_message_names_days() {
        let err = TrendError::EmptyWindow { days: 7 };
        assert_eq!(err.to_string(), "no data in the last 7 days");
    }
}

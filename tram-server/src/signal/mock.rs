//! Mock signal source for running without provider access.
//!
//! Loads line summaries from JSON files and serves them as if they were live
//! API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{LineCode, StopCode};

use super::client::countdown_for_line;
use super::error::SignalError;
use super::types::LineSummary;
use super::{Countdown, SignalSource};

/// Signal source that serves line summaries from memory.
#[derive(Debug, Clone, Default)]
pub struct MockSignalSource {
    /// Pre-loaded summaries, keyed by stop code.
    summaries: Arc<RwLock<HashMap<StopCode, LineSummary>>>,
}

impl MockSignalSource {
    /// Build a mock from summaries already in memory.
    pub fn from_summaries(summaries: HashMap<StopCode, LineSummary>) -> Self {
        Self {
            summaries: Arc::new(RwLock::new(summaries)),
        }
    }

    /// Load all `{stop_code}.json` files in a directory.
    pub fn load_dir(data_dir: impl AsRef<Path>) -> Result<Self, SignalError> {
        let data_dir = data_dir.as_ref();
        let mut summaries = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            SignalError::NotConfigured(format!(
                "failed to read mock data directory {}: {e}",
                data_dir.display()
            ))
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                SignalError::NotConfigured(format!("failed to read directory entry: {e}"))
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let code = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| StopCode::parse(s).ok())
                .ok_or_else(|| {
                    SignalError::NotConfigured(format!("invalid mock filename: {}", path.display()))
                })?;

            let json = std::fs::read_to_string(&path).map_err(|e| {
                SignalError::NotConfigured(format!("failed to read {}: {e}", path.display()))
            })?;

            let summary: LineSummary = serde_json::from_str(&json).map_err(|e| SignalError::Json {
                message: format!("{}: {e}", path.display()),
                body: None,
            })?;

            summaries.insert(code, summary);
        }

        if summaries.is_empty() {
            return Err(SignalError::NotConfigured(format!(
                "no mock summary files found in {}",
                data_dir.display()
            )));
        }

        Ok(Self::from_summaries(summaries))
    }

    /// Replace the summary served for a stop.
    pub async fn set_summary(&self, stop: StopCode, summary: LineSummary) {
        self.summaries.write().await.insert(stop, summary);
    }

    /// Stops that have mock data.
    pub async fn available_stops(&self) -> Vec<StopCode> {
        let summaries = self.summaries.read().await;
        let mut stops: Vec<_> = summaries.keys().cloned().collect();
        stops.sort();
        stops
    }
}

impl SignalSource for MockSignalSource {
    async fn fetch(&self, stop: &StopCode, line: &LineCode) -> Result<Countdown, SignalError> {
        let summaries = self.summaries.read().await;

        let summary = summaries.get(stop).ok_or_else(|| SignalError::Api {
            status: 404,
            message: format!("no mock data for stop {stop}"),
        })?;

        countdown_for_line(summary, stop, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(s: &str) -> StopCode {
        StopCode::parse(s).unwrap()
    }

    fn line(s: &str) -> LineCode {
        LineCode::parse(s).unwrap()
    }

    #[tokio::test]
    async fn load_bundled_data() {
        let source = MockSignalSource::load_dir("data/mock_stops").unwrap();
        let stops = source.available_stops().await;
        assert!(stops.contains(&stop("15371")));
    }

    #[tokio::test]
    async fn serves_bundled_countdown() {
        let source = MockSignalSource::load_dir("data/mock_stops").unwrap();
        let countdown = source.fetch(&stop("15371"), &line("15")).await.unwrap();
        assert_eq!(countdown, Countdown::Minutes(8));
    }

    #[tokio::test]
    async fn unknown_stop_returns_error() {
        let source = MockSignalSource::default();
        let result = source.fetch(&stop("99999"), &line("15")).await;
        assert!(matches!(result, Err(SignalError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn set_summary_replaces_data() {
        let source = MockSignalSource::default();
        let summary: LineSummary =
            serde_json::from_str(r#"{"Lines": [{"Line": {"LineCode": "3"}, "WaitMessage": "2 min"}]}"#)
                .unwrap();
        source.set_summary(stop("11139"), summary).await;

        let countdown = source.fetch(&stop("11139"), &line("3")).await.unwrap();
        assert_eq!(countdown, Countdown::Minutes(2));
    }

    #[test]
    fn empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MockSignalSource::load_dir(dir.path()).is_err());
    }

    #[test]
    fn ignores_non_json_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.txt"), "not a summary").unwrap();
        std::fs::write(
            dir.path().join("42.json"),
            r#"{"Lines": [{"Line": {"LineCode": "3"}, "WaitMessage": "5 min"}]}"#,
        )
        .unwrap();

        assert!(MockSignalSource::load_dir(dir.path()).is_ok());
    }
}

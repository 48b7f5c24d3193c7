//! Append-only error log, one file per failure.
//!
//! Files land in the configured directory as
//! `<year>-<month>-<day>-error-logs-<unix millis>.txt` and hold a single JSON
//! line with the timestamp, the stage that failed and the error message.

use crate::errors::RunError;
use chrono::{DateTime, Datelike, Local};
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, instrument};

/// Receiver for run-aborting failures.
pub trait ErrorSink {
    async fn record(&self, failure: &RunError);
}

#[derive(Debug, Clone)]
pub struct FileErrorLog {
    dir: PathBuf,
}

impl FileErrorLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File name for a failure recorded at `at`.
    pub fn file_name(at: &DateTime<Local>) -> String {
        format!(
            "{}-{}-{}-error-logs-{}.txt",
            at.year(),
            at.month(),
            at.day(),
            at.timestamp_millis()
        )
    }

    /// Write one record and return the file it went to.
    pub async fn write(&self, failure: &RunError, at: DateTime<Local>) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name(&at));
        let line = serde_json::json!({
            "timestamp": at.to_rfc3339(),
            "stage": failure.stage(),
            "error": failure.to_string(),
        });

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(format!("{line}\n").as_bytes()).await?;
        file.flush().await?;
        Ok(path)
    }
}

impl ErrorSink for FileErrorLog {
    #[instrument(level = "info", skip_all, fields(stage = failure.stage()))]
    async fn record(&self, failure: &RunError) {
        match self.write(failure, Local::now()).await {
            Ok(path) => info!(path = %path.display(), "An error happened; details written to the error log"),
            Err(e) => error!(dir = %self.dir.display(), error = %e, "Failed to write error log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ExtractionFailure, PublishFailure};
    use chrono::TimeZone;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 7, 22, 5, 0).unwrap()
    }

    #[test]
    fn test_file_name_layout() {
        let at = at();
        assert_eq!(
            FileErrorLog::file_name(&at),
            format!("2024-3-7-error-logs-{}.txt", at.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_write_creates_dir_and_json_line() {
        let root = tempfile::tempdir().unwrap();
        let log = FileErrorLog::new(root.path().join("logs"));
        let failure = RunError::from(ExtractionFailure::MissingRegion {
            source_name: "primary",
            selector: ".line".to_string(),
        });

        let path = log.write(&failure, at()).await.unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let record: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(record["stage"], "extracting");
        assert!(record["error"].as_str().unwrap().contains("no rows matched"));
        assert!(record["timestamp"].as_str().unwrap().starts_with("2024-03-07T22:05:00"));
    }

    #[tokio::test]
    async fn test_write_appends_within_same_millisecond() {
        let root = tempfile::tempdir().unwrap();
        let log = FileErrorLog::new(root.path());
        let failure = RunError::from(PublishFailure::NotConfigured);

        let first = log.write(&failure, at()).await.unwrap();
        let second = log.write(&failure, at()).await.unwrap();
        assert_eq!(first, second);
        let contents = std::fs::read_to_string(&first).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_record_swallows_unwritable_dir() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let log = FileErrorLog::new(blocker.join("logs"));
        log.record(&RunError::from(PublishFailure::NotConfigured)).await;
    }
}

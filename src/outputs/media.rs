//! Mapping leaders to pictures on disk.
//!
//! A leader's picture is expected at `<dir>/<LastName>.<ext>`, using the last
//! name exactly as scraped. A missing picture is normal and only costs that
//! leader its attachment. Last names containing a path separator never
//! resolve.

use crate::errors::MediaNotFound;
use crate::models::{MediaAsset, PlayerRecord};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct MediaResolver {
    dir: PathBuf,
    extension: String,
}

impl MediaResolver {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Where the picture for `record` should be.
    pub fn expected_path(&self, record: &PlayerRecord) -> PathBuf {
        self.dir
            .join(format!("{}.{}", record.last_name, self.extension))
    }

    /// Look up the picture for one leader.
    pub async fn resolve(&self, record: &PlayerRecord) -> Result<MediaAsset, MediaNotFound> {
        let path = self.expected_path(record);
        if record.last_name.contains(['/', '\\']) {
            return Err(MediaNotFound {
                last_name: record.last_name.clone(),
                expected: path,
            });
        }
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(MediaAsset {
                last_name: record.last_name.clone(),
                path,
            }),
            _ => Err(MediaNotFound {
                last_name: record.last_name.clone(),
                expected: path,
            }),
        }
    }

    /// Resolve every leader in order, skipping the ones without a picture.
    #[instrument(level = "info", skip_all, fields(leaders = leaders.len()))]
    pub async fn resolve_all(&self, leaders: &[PlayerRecord]) -> Vec<MediaAsset> {
        let assets: Vec<MediaAsset> = stream::iter(leaders)
            .then(move |record| async move {
                match self.resolve(record).await {
                    Ok(asset) => {
                        debug!(path = %asset.path.display(), "Found leader picture");
                        Some(asset)
                    }
                    Err(e) => {
                        warn!(error = %e, "Player without picture");
                        None
                    }
                }
            })
            .filter_map(std::future::ready)
            .collect()
            .await;

        info!(found = assets.len(), "Resolved leader pictures");
        assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> PlayerRecord {
        PlayerRecord::new(name, None, 20).unwrap()
    }

    #[test]
    fn test_expected_path_uses_raw_last_name() {
        let resolver = MediaResolver::new("img", "jpeg");
        assert_eq!(
            resolver.expected_path(&record("Kylian Mbappé")),
            PathBuf::from("img/Mbappé.jpeg")
        );
    }

    #[tokio::test]
    async fn test_resolve_found_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Kane.jpeg"), b"jpeg").unwrap();
        let resolver = MediaResolver::new(dir.path(), "jpeg");

        let asset = resolver.resolve(&record("Harry Kane")).await.unwrap();
        assert_eq!(asset.path, dir.path().join("Kane.jpeg"));

        let missing = resolver.resolve(&record("Erling Haaland")).await.unwrap_err();
        assert_eq!(missing.last_name, "Haaland");
        assert_eq!(missing.expected, dir.path().join("Haaland.jpeg"));
    }

    #[tokio::test]
    async fn test_resolve_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Kane.jpeg")).unwrap();
        let resolver = MediaResolver::new(dir.path(), "jpeg");
        assert!(resolver.resolve(&record("Harry Kane")).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_rejects_path_separators() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("img");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(root.path().join("x.jpeg"), b"outside").unwrap();
        let resolver = MediaResolver::new(&dir, "jpeg");

        for name in ["Joe ../x", "Joe a\\..\\x"] {
            let err = resolver.resolve(&record(name)).await.unwrap_err();
            assert!(err.last_name.contains(['/', '\\']));
        }
    }

    #[tokio::test]
    async fn test_resolve_all_skips_missing_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Salah.jpeg"), b"a").unwrap();
        std::fs::write(dir.path().join("Kane.jpeg"), b"b").unwrap();
        let resolver = MediaResolver::new(dir.path(), "jpeg");

        let leaders = vec![
            record("Mohamed Salah"),
            record("Erling Haaland"),
            record("Harry Kane"),
        ];
        let assets = resolver.resolve_all(&leaders).await;
        let names: Vec<&str> = assets.iter().map(|a| a.last_name.as_str()).collect();
        assert_eq!(names, vec!["Salah", "Kane"]);
    }
}

//! Runtime settings loaded from an optional YAML file.
//!
//! Every field has a default matching the live sites, so running without a
//! config file scrapes footballdatabase.eu and maxifoot.fr and only needs a
//! publisher endpoint (or `--dry-run`). Without an endpoint a real run fails
//! at publishing and lands in the error log.
//!
//! # Example
//!
//! ```yaml
//! period_label: "2024"
//! secondary:
//!   url: "https://www.maxifoot.fr/classement-buteur-europe-annee-civile-2-{period}.htm"
//! publisher:
//!   endpoint: "https://poster.internal/announce"
//! schedule:
//!   hour: 22
//!   minute: 5
//! ```

use crate::engine::announce::GOAL_MARKER;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Placeholder replaced by the period label inside source URLs.
pub const PERIOD_PLACEHOLDER: &str = "{period}";

/// Top-level settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Label used in the header and in source URLs; defaults to the current year.
    pub period_label: Option<String>,
    /// Per-request timeout for both sources and the publisher.
    pub request_timeout_secs: u64,
    /// Pause between the primary and secondary fetches.
    pub source_delay_ms: u64,
    /// Appended to every goal count in the announcement.
    pub goal_marker: String,
    pub primary: PrimarySource,
    pub secondary: SecondarySource,
    pub media: MediaSettings,
    pub publisher: PublisherSettings,
    /// Directory receiving one file per failed run.
    pub error_log_dir: PathBuf,
    pub schedule: ScheduleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            period_label: None,
            request_timeout_secs: 60,
            source_delay_ms: 1000,
            goal_marker: GOAL_MARKER.to_string(),
            primary: PrimarySource::default(),
            secondary: SecondarySource::default(),
            media: MediaSettings::default(),
            publisher: PublisherSettings::default(),
            error_log_dir: PathBuf::from("logs"),
            schedule: ScheduleSettings::default(),
        }
    }
}

/// Ranked scorer list with goal counts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PrimarySource {
    pub url: String,
    pub row_selector: String,
    pub name_selector: String,
    pub goals_selector: String,
    pub country_selector: String,
    pub country_attr: String,
}

impl Default for PrimarySource {
    fn default() -> Self {
        Self {
            url: "https://www.footballdatabase.eu/en/players".to_string(),
            row_selector: ".pbestscorers:nth-child(2) .line".to_string(),
            name_selector: ".player > a".to_string(),
            goals_selector: ".score > a".to_string(),
            country_selector: "span.real_flag".to_string(),
            country_attr: "title".to_string(),
        }
    }
}

/// Scorer list used only to validate primary names.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecondarySource {
    pub url: String,
    pub name_selector: String,
}

impl Default for SecondarySource {
    fn default() -> Self {
        Self {
            url: "https://www.maxifoot.fr/classement-buteur-europe-annee-civile-2-{period}.htm"
                .to_string(),
            name_selector: "tr .jou1 > b".to_string(),
        }
    }
}

/// Where leader pictures are expected on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MediaSettings {
    pub dir: PathBuf,
    pub extension: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("img"),
            extension: "jpeg".to_string(),
        }
    }
}

/// HTTP endpoint receiving the announcement.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PublisherSettings {
    pub endpoint: Option<String>,
}

/// Daily local time at which the scheduler triggers a run.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ScheduleSettings {
    pub hour: u32,
    pub minute: u32,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self { hour: 22, minute: 5 }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using defaults");
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_string(),
                source,
            })?;
        let settings = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        info!(path, "Loaded configuration");
        Ok(settings)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(raw)
    }

    /// Check everything that would otherwise fail halfway through a run.
    pub fn validate(&self, period_label: &str) -> Result<(), ConfigError> {
        resolve_url("primary", &self.primary.url, period_label)?;
        resolve_url("secondary", &self.secondary.url, period_label)?;

        if let Some(endpoint) = &self.publisher.endpoint {
            Url::parse(endpoint).map_err(|source| ConfigError::Url {
                field: "publisher",
                value: endpoint.clone(),
                source,
            })?;
        }

        if self.schedule.hour > 23 || self.schedule.minute > 59 {
            return Err(ConfigError::Schedule {
                hour: self.schedule.hour,
                minute: self.schedule.minute,
            });
        }
        Ok(())
    }
}

/// Substitute the period label into a source URL and parse it.
pub fn resolve_url(field: &'static str, template: &str, period_label: &str) -> Result<Url, ConfigError> {
    let value = template.replace(PERIOD_PLACEHOLDER, period_label);
    Url::parse(&value).map_err(|source| ConfigError::Url {
        field,
        value,
        source,
    })
}

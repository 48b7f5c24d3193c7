//! Typed failures for every stage of a run.
//!
//! Only [`ExtractionFailure`] and [`PublishFailure`] end up in the error log.
//! The others describe expected outcomes ("no last name on this row",
//! "nobody to announce", "no picture for this player") that the orchestrator
//! handles locally.

use std::path::PathBuf;
use thiserror::Error;

/// A display name from which no last name can be derived.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed player name {0:?}: no whitespace-delimited token")]
pub struct MalformedNameError(pub String);

/// The filtered roster was empty, so there is nobody to lead it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("filtered roster is empty")]
pub struct EmptyRosterError;

/// A source page could not be turned into records.
#[derive(Error, Debug)]
pub enum ExtractionFailure {
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("no rows matched {selector:?} on the {source_name} page")]
    MissingRegion {
        source_name: &'static str,
        selector: String,
    },

    #[error("row {row} ({name}) has no numeric goal count in {raw:?}")]
    InvalidGoalCount {
        row: usize,
        name: String,
        raw: String,
    },

    #[error("invalid CSS selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// No asset exists for a leader. Always non-fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no media for {last_name} at {}", .expected.display())]
pub struct MediaNotFound {
    pub last_name: String,
    pub expected: PathBuf,
}

/// The publisher could not deliver the announcement.
#[derive(Error, Debug)]
pub enum PublishFailure {
    #[error("publish request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("publisher answered with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("no publisher endpoint configured")]
    NotConfigured,
}

/// Settings that cannot be loaded or do not make sense.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {field} URL {value:?}: {source}")]
    Url {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid schedule time {hour:02}:{minute:02}")]
    Schedule { hour: u32, minute: u32 },
}

/// Anything that is handed to the error log.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("publishing failed: {0}")]
    Publish(#[from] PublishFailure),
}

impl RunError {
    /// Short stage tag written next to each error-log record.
    pub fn stage(&self) -> &'static str {
        match self {
            RunError::Extraction(_) => "extracting",
            RunError::Publish(_) => "publishing",
        }
    }
}

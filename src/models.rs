//! Data models shared by the scrapers, the engine and the outputs.
//!
//! - [`ScorerRow`]: raw fields of one primary-source row, as scraped
//! - [`PlayerRecord`]: a validated scorer entry with a derived last name
//! - [`ValidityKeys`]: lower-cased last names published by the secondary source
//! - [`MediaAsset`] and [`Post`]: what is handed to the publisher
//!
//! Everything here lives for a single run only.

use crate::engine::normalize;
use crate::errors::MalformedNameError;
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// One primary-source row before its name has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerRow {
    /// Display name as it appears on the page.
    pub full_name: String,
    /// Country from the row's flag, when the row has one.
    pub country: Option<String>,
    /// Goals scored during the reporting period.
    pub goal_count: u32,
}

/// A scorer that made it into the core.
///
/// `last_name` is always the final whitespace token of `full_name` and is never
/// empty; use [`PlayerRecord::new`] or [`TryFrom<ScorerRow>`] to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRecord {
    pub full_name: String,
    pub last_name: String,
    pub country: Option<String>,
    pub goal_count: u32,
}

impl PlayerRecord {
    pub fn new(
        full_name: impl Into<String>,
        country: Option<String>,
        goal_count: u32,
    ) -> Result<Self, MalformedNameError> {
        let full_name = full_name.into();
        let last_name = normalize::last_name(&full_name)?.to_string();
        Ok(Self {
            full_name,
            last_name,
            country,
            goal_count,
        })
    }

    /// Comparison key used against [`ValidityKeys`].
    pub fn key(&self) -> String {
        self.last_name.to_lowercase()
    }
}

impl TryFrom<ScorerRow> for PlayerRecord {
    type Error = MalformedNameError;

    fn try_from(row: ScorerRow) -> Result<Self, Self::Error> {
        PlayerRecord::new(row.full_name, row.country, row.goal_count)
    }
}

/// Set of normalized last names from the secondary source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityKeys(HashSet<String>);

impl ValidityKeys {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for ValidityKeys {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An image expected to exist on disk for one leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub last_name: String,
    pub path: PathBuf,
}

/// Final payload for the publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub text: String,
    /// Ordered like the leaderboard; may be empty.
    pub media: Vec<MediaAsset>,
}

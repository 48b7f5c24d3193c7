//! Scorer-list scrapers for the two sources.
//!
//! Each source has a pure parsing module working on HTML text, and
//! [`HttpExtractor`] glues them to `reqwest`:
//!
//! | Source | Module | Role |
//! |--------|--------|------|
//! | footballdatabase.eu | [`footballdatabase`] | Ranked scorers with goal counts (primary) |
//! | maxifoot.fr | [`maxifoot`] | Scorer names used for cross-checking (secondary) |
//!
//! A page whose expected rows are missing is an [`ExtractionFailure`]; the
//! orchestrator aborts the run on it.

pub mod footballdatabase;
pub mod maxifoot;

use crate::config::{PrimarySource, SecondarySource};
use crate::errors::ExtractionFailure;
use crate::models::ScorerRow;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Selector};
use tracing::{debug, info, instrument};
use url::Url;

static GOAL_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Source of the two raw lists a run needs.
pub trait Extractor {
    /// Ranked rows from the primary source, in page order.
    async fn primary(&self) -> Result<Vec<ScorerRow>, ExtractionFailure>;

    /// Raw display names from the secondary source.
    async fn secondary(&self) -> Result<Vec<String>, ExtractionFailure>;
}

/// [`Extractor`] fetching both pages over HTTP.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: Client,
    primary_url: Url,
    secondary_url: Url,
    primary: PrimarySource,
    secondary: SecondarySource,
}

impl HttpExtractor {
    /// `primary_url` and `secondary_url` are the already-resolved page URLs.
    pub fn new(
        client: Client,
        primary_url: Url,
        secondary_url: Url,
        primary: PrimarySource,
        secondary: SecondarySource,
    ) -> Self {
        Self {
            client,
            primary_url,
            secondary_url,
            primary,
            secondary,
        }
    }
}

impl Extractor for HttpExtractor {
    #[instrument(level = "info", skip_all, fields(url = %self.primary_url))]
    async fn primary(&self) -> Result<Vec<ScorerRow>, ExtractionFailure> {
        let html = fetch_page(&self.client, &self.primary_url).await?;
        let rows = footballdatabase::parse_scorer_rows(&html, &self.primary)?;
        info!(count = rows.len(), "Collected primary scorer rows");
        Ok(rows)
    }

    #[instrument(level = "info", skip_all, fields(url = %self.secondary_url))]
    async fn secondary(&self) -> Result<Vec<String>, ExtractionFailure> {
        let html = fetch_page(&self.client, &self.secondary_url).await?;
        let names = maxifoot::parse_scorer_names(&html, &self.secondary)?;
        info!(count = names.len(), "Collected secondary scorer names");
        Ok(names)
    }
}

/// GET a page and return its body; non-2xx answers are failures.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, ExtractionFailure> {
    let fetch_err = |source| ExtractionFailure::Fetch {
        url: url.to_string(),
        source,
    };
    let response = client.get(url.clone()).send().await.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExtractionFailure::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = response.text().await.map_err(fetch_err)?;
    debug!(bytes = body.len(), %url, "Fetched page");
    Ok(body)
}

/// Parse a configured CSS selector.
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionFailure> {
    Selector::parse(css).map_err(|e| ExtractionFailure::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First run of digits in a goal cell, e.g. `"30"` or `"30 (4 pen.)"`.
pub(crate) fn parse_goal_count(raw: &str) -> Option<u32> {
    GOAL_COUNT.find(raw).and_then(|m| m.as_str().parse().ok())
}

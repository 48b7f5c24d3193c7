//! footballdatabase.eu top-scorer table (primary source).
//!
//! The page lists scorers as `.line` blocks; the first block is a header with
//! no player link and is skipped. Within a row, the player link holds the
//! display name, the score link the goal total, and an optional flag span
//! carries the country in its `title` attribute.

use super::{element_text, parse_goal_count, selector};
use crate::config::PrimarySource;
use crate::errors::ExtractionFailure;
use crate::models::ScorerRow;
use scraper::Html;
use tracing::debug;

/// Extract ranked scorer rows from the primary page, in page order.
///
/// Fails when no row matches at all, or when a row with a player link has no
/// numeric goal count.
pub fn parse_scorer_rows(html: &str, source: &PrimarySource) -> Result<Vec<ScorerRow>, ExtractionFailure> {
    let row_sel = selector(&source.row_selector)?;
    let name_sel = selector(&source.name_selector)?;
    let goals_sel = selector(&source.goals_selector)?;
    let country_sel = selector(&source.country_selector)?;

    let document = Html::parse_document(html);
    let mut matched = 0usize;
    let mut rows = Vec::new();

    for (i, row) in document.select(&row_sel).enumerate() {
        matched += 1;
        let Some(name) = row.select(&name_sel).next() else {
            debug!(row = i, "Row has no player link; skipping");
            continue;
        };
        let full_name = element_text(name);

        let raw_goals = row
            .select(&goals_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        let goal_count = parse_goal_count(&raw_goals).ok_or_else(|| {
            ExtractionFailure::InvalidGoalCount {
                row: i,
                name: full_name.clone(),
                raw: raw_goals.clone(),
            }
        })?;

        let country = row
            .select(&country_sel)
            .next()
            .and_then(|flag| flag.value().attr(&source.country_attr))
            .map(String::from);

        rows.push(ScorerRow {
            full_name,
            country,
            goal_count,
        });
    }

    if matched == 0 {
        return Err(ExtractionFailure::MissingRegion {
            source_name: "primary",
            selector: source.row_selector.clone(),
        });
    }
    Ok(rows)
}

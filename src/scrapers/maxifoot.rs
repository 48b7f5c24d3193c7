//! maxifoot.fr calendar-year scorer ranking (secondary source).
//!
//! Only the names matter here; each ranked row wraps the player name in a
//! `<b>` inside its `.jou1` cell.

use super::{element_text, selector};
use crate::config::SecondarySource;
use crate::errors::ExtractionFailure;
use scraper::Html;

/// Extract raw scorer names from the secondary page.
pub fn parse_scorer_names(html: &str, source: &SecondarySource) -> Result<Vec<String>, ExtractionFailure> {
    let name_sel = selector(&source.name_selector)?;
    let document = Html::parse_document(html);
    let names: Vec<String> = document.select(&name_sel).map(element_text).collect();

    if names.is_empty() {
        return Err(ExtractionFailure::MissingRegion {
            source_name: "secondary",
            selector: source.name_selector.clone(),
        });
    }
    Ok(names)
}

//! Last-name extraction and the comparison key built from it.
//!
//! Matching between the two sources is deliberately crude: the last
//! whitespace token, lower-cased. Accents and punctuation are kept as-is, so
//! "Mbappé" and "Mbappe" do not match and two different "Silva"s do.

use crate::errors::MalformedNameError;

/// Final whitespace-delimited token of `full_name`, original case.
pub fn last_name(full_name: &str) -> Result<&str, MalformedNameError> {
    full_name
        .split_whitespace()
        .next_back()
        .ok_or_else(|| MalformedNameError(full_name.to_string()))
}

/// Comparison key for a display name: its last token, lower-cased.
pub fn normalize(full_name: &str) -> Result<String, MalformedNameError> {
    last_name(full_name).map(str::to_lowercase)
}

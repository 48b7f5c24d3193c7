//! Picking the joint leaders of a filtered roster.

use crate::errors::EmptyRosterError;
use crate::models::PlayerRecord;
use itertools::Itertools;

/// Every record tied at the highest goal count, in roster order.
///
/// Ties are never broken: each leader gets its own media lookup later on.
pub fn select_leaders(roster: &[PlayerRecord]) -> Result<Vec<PlayerRecord>, EmptyRosterError> {
    if roster.is_empty() {
        return Err(EmptyRosterError);
    }
    Ok(roster
        .iter()
        .max_set_by_key(|record| record.goal_count)
        .into_iter()
        .cloned()
        .collect())
}

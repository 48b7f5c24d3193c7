//! Cross-checking the primary ranking against the secondary name list.

use crate::engine::normalize::normalize;
use crate::models::{PlayerRecord, ScorerRow, ValidityKeys};
use tracing::{debug, warn};

/// Turn scraped rows into records, skipping rows whose name has no last name.
///
/// One bad row never blocks the rest of the ranking.
pub fn records_from_rows(rows: Vec<ScorerRow>) -> Vec<PlayerRecord> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(i, row)| match PlayerRecord::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(row = i, error = %e, "Skipping primary row");
                None
            }
        })
        .collect()
}

/// Build the validity key set from raw secondary-source names.
pub fn validity_keys<I, S>(names: I) -> ValidityKeys
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| match normalize(name.as_ref()) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(error = %e, "Skipping secondary name");
                None
            }
        })
        .collect()
}

/// Keep the primary records whose last name the secondary source also lists.
///
/// Order is preserved and duplicates are not collapsed.
pub fn reconcile(primary: &[PlayerRecord], keys: &ValidityKeys) -> Vec<PlayerRecord> {
    let roster: Vec<PlayerRecord> = primary
        .iter()
        .filter(|record| keys.contains(&record.key()))
        .cloned()
        .collect();
    debug!(
        primary = primary.len(),
        keys = keys.len(),
        kept = roster.len(),
        "Reconciled primary list"
    );
    roster
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, goals: u32) -> PlayerRecord {
        PlayerRecord::new(name, None, goals).unwrap()
    }

    fn keys(names: &[&str]) -> ValidityKeys {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_haaland_scenario() {
        let primary = vec![record("Erling Haaland", 30), record("Harry Kane", 28)];
        let roster = reconcile(&primary, &keys(&["haaland"]));
        assert_eq!(roster, vec![record("Erling Haaland", 30)]);
    }

    #[test]
    fn test_reconcile_preserves_order() {
        let primary = vec![
            record("Harry Kane", 28),
            record("Erling Haaland", 30),
            record("Mohamed Salah", 25),
            record("Kylian Mbappé", 27),
        ];
        let roster = reconcile(&primary, &keys(&["mbappé", "kane", "salah"]));
        let names: Vec<&str> = roster.iter().map(|r| r.last_name.as_str()).collect();
        assert_eq!(names, vec!["Kane", "Salah", "Mbappé"]);
    }

    #[test]
    fn test_reconcile_empty_keys_is_empty_every_time() {
        let primary = vec![record("Erling Haaland", 30), record("Harry Kane", 28)];
        let empty = ValidityKeys::default();
        assert!(reconcile(&primary, &empty).is_empty());
        assert!(reconcile(&primary, &empty).is_empty());
    }

    #[test]
    fn test_reconcile_keeps_primary_duplicates() {
        let primary = vec![record("Harry Kane", 28), record("Harry Kane", 28)];
        let roster = reconcile(&primary, &keys(&["kane"]));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_reconcile_is_case_insensitive_on_primary_side() {
        let primary = vec![record("Lautaro MARTÍNEZ", 24)];
        let roster = reconcile(&primary, &validity_keys(["Lautaro Martínez"]));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_reconcile_does_not_fold_accents() {
        let primary = vec![record("Kylian Mbappe", 27)];
        let roster = reconcile(&primary, &validity_keys(["Kylian Mbappé"]));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_records_from_rows_skips_blank_names() {
        let rows = vec![
            ScorerRow {
                full_name: "Erling Haaland".to_string(),
                country: Some("Norway".to_string()),
                goal_count: 30,
            },
            ScorerRow {
                full_name: "  ".to_string(),
                country: None,
                goal_count: 29,
            },
            ScorerRow {
                full_name: "Harry Kane".to_string(),
                country: None,
                goal_count: 28,
            },
        ];
        let records = records_from_rows(rows);
        let names: Vec<&str> = records.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Erling Haaland", "Harry Kane"]);
    }

    #[test]
    fn test_validity_keys_normalizes_and_skips_blank() {
        let keys = validity_keys(["Harry Kane", "", "  ", "Robert LEWANDOWSKI", "Kane"]);
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("kane"));
        assert!(keys.contains("lewandowski"));
    }
}

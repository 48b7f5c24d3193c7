//! Rendering the announcement text.
//!
//! The text is a pure function of the filtered roster, not of the
//! leaderboard: it lists up to [`MAX_LINES`] players in the primary source's
//! ranking order, with no indication when more were left out.

use crate::models::PlayerRecord;

/// Number of roster entries that make it into the text.
pub const MAX_LINES: usize = 5;

/// Default marker appended to every goal count.
pub const GOAL_MARKER: &str = "⚽️";

/// Fixed header line for a reporting period.
pub fn header(period_label: &str) -> String {
    format!("❌ No.\n\nClosest players in {period_label} :\n\n")
}

/// Render the announcement: header, then `"<name> - <goals> <marker>"` lines.
///
/// Names are passed through untouched.
pub fn format(roster: &[PlayerRecord], period_label: &str, goal_marker: &str) -> String {
    let mut text = header(period_label);
    for player in roster.iter().take(MAX_LINES) {
        text.push_str(&format!(
            "{} - {} {}\n",
            player.full_name, player.goal_count, goal_marker
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<PlayerRecord> {
        (0..n)
            .map(|i| PlayerRecord::new(format!("Player Number{i}"), None, 40 - i as u32).unwrap())
            .collect()
    }

    fn body_lines(text: &str, label: &str) -> Vec<String> {
        text.strip_prefix(&header(label))
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_format_exact_text() {
        let roster = vec![
            PlayerRecord::new("Erling Haaland", None, 30).unwrap(),
            PlayerRecord::new("Harry Kane", None, 28).unwrap(),
        ];
        assert_eq!(
            format(&roster, "2024", GOAL_MARKER),
            "❌ No.\n\nClosest players in 2024 :\n\nErling Haaland - 30 ⚽️\nHarry Kane - 28 ⚽️\n"
        );
    }

    #[test]
    fn test_format_empty_roster_is_header_only() {
        assert_eq!(format(&[], "2024", GOAL_MARKER), header("2024"));
    }

    #[test]
    fn test_format_truncates_at_five() {
        for n in [5, 6, 12] {
            let text = format(&roster(n), "2024", GOAL_MARKER);
            let lines = body_lines(&text, "2024");
            assert_eq!(lines.len(), MAX_LINES);
            assert_eq!(lines[4], "Player Number4 - 36 ⚽️");
        }
    }

    #[test]
    fn test_format_keeps_all_below_five() {
        for n in 1..MAX_LINES {
            let text = format(&roster(n), "2024", GOAL_MARKER);
            assert_eq!(body_lines(&text, "2024").len(), n);
        }
    }

    #[test]
    fn test_format_does_not_resort() {
        let roster = vec![
            PlayerRecord::new("Harry Kane", None, 20).unwrap(),
            PlayerRecord::new("Erling Haaland", None, 30).unwrap(),
        ];
        let lines = body_lines(&format(&roster, "2024", GOAL_MARKER), "2024");
        assert_eq!(lines[0], "Harry Kane - 20 ⚽️");
        assert_eq!(lines[1], "Erling Haaland - 30 ⚽️");
    }

    #[test]
    fn test_format_is_deterministic() {
        let r = roster(7);
        assert_eq!(format(&r, "2023/24", GOAL_MARKER), format(&r, "2023/24", GOAL_MARKER));
    }

    #[test]
    fn test_format_uses_given_marker() {
        let roster = vec![PlayerRecord::new("Harry Kane", None, 3).unwrap()];
        let text = format(&roster, "2024", "goals");
        assert!(text.ends_with("Harry Kane - 3 goals\n"));
        assert!(!text.contains(GOAL_MARKER));
    }

    #[test]
    fn test_format_passes_names_through() {
        let roster = vec![PlayerRecord::new("Lamine \"Yamal\", Jr", None, 9).unwrap()];
        let text = format(&roster, "2025", GOAL_MARKER);
        assert!(text.ends_with("Lamine \"Yamal\", Jr - 9 ⚽️\n"));
    }
}

use std::cmp::Reverse;

use crate::models::{MatchRecord, Side};

/// Status code of a match whose statistics are final.
pub const FINISHED_STATUS: &str = "finished";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonFilter {
    All,
    Only(String),
}

impl SeasonFilter {
    /// `"all"` (any case) or an empty value means no season filter.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            SeasonFilter::All
        } else {
            SeasonFilter::Only(raw.to_string())
        }
    }

    pub fn matches(&self, season: &str) -> bool {
        match self {
            SeasonFilter::All => true,
            SeasonFilter::Only(wanted) => wanted == season,
        }
    }
}

/// A team's filtered matches, most recent first.
#[derive(Debug, Clone)]
pub struct MatchSelection<'a> {
    team: String,
    matches: Vec<&'a MatchRecord>,
}

impl<'a> MatchSelection<'a> {
    pub fn all(&self) -> &[&'a MatchRecord] {
        &self.matches
    }

    pub fn home(&self) -> Vec<&'a MatchRecord> {
        self.on_side(Side::Home)
    }

    pub fn away(&self) -> Vec<&'a MatchRecord> {
        self.on_side(Side::Away)
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    fn on_side(&self, side: Side) -> Vec<&'a MatchRecord> {
        self.matches
            .iter()
            .copied()
            .filter(|m| m.side_of(&self.team) == Some(side))
            .collect()
    }
}

/// Narrow the table to `team`'s matches with the given status and season,
/// newest first, keeping at most `recency` of them.
pub fn select_matches<'a>(
    all_matches: &'a [MatchRecord],
    team: &str,
    season: &SeasonFilter,
    status: &str,
    recency: Option<usize>,
) -> MatchSelection<'a> {
    let mut matches = matches_for_team(all_matches, team, season);
    matches.retain(|m| m.status.trim().eq_ignore_ascii_case(status));

    if let Some(limit) = recency {
        matches.truncate(limit);
    }

    MatchSelection {
        team: team.to_string(),
        matches,
    }
}

/// Every match `team` appears in for the season regardless of status, newest first.
pub fn matches_for_team<'a>(
    all_matches: &'a [MatchRecord],
    team: &str,
    season: &SeasonFilter,
) -> Vec<&'a MatchRecord> {
    let mut matches: Vec<&MatchRecord> = all_matches
        .iter()
        .filter(|m| m.involves(team))
        .filter(|m| season.matches(&m.season))
        .collect();

    // Undated rows sort last; stable for equal dates.
    matches.sort_by_key(|m| Reverse(m.date));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{load, row};

    fn table() -> Vec<MatchRecord> {
        load(vec![
            row("1", "A", "B").date("2024-08-10").season("2024"),
            row("2", "C", "A").date("2024-09-01").season("2024"),
            row("3", "A", "C").date("2025-08-15").season("2025"),
            row("4", "B", "A").date("2025-09-20").season("2025").status("scheduled"),
            row("5", "B", "C").date("2025-09-21").season("2025"),
            row("6", "A", "D").season("2025").status("Finished "),
        ])
    }

    fn ids(matches: &[&MatchRecord]) -> Vec<String> {
        matches.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_selects_finished_team_matches_newest_first() {
        let rows = table();
        let selection = select_matches(&rows, "A", &SeasonFilter::All, FINISHED_STATUS, None);
        assert_eq!(ids(selection.all()), vec!["3", "2", "1", "6"]);
    }

    #[test]
    fn test_home_and_away_split_the_selection() {
        let rows = table();
        let selection = select_matches(&rows, "A", &SeasonFilter::All, FINISHED_STATUS, None);
        assert_eq!(ids(&selection.home()), vec!["3", "1", "6"]);
        assert_eq!(ids(&selection.away()), vec!["2"]);
        assert_eq!(selection.home().len() + selection.away().len(), selection.len());
    }

    #[test]
    fn test_season_filter_ignores_recency() {
        let rows = load(vec![
            row("1", "A", "B").season("2024").date("2024-05-01"),
            row("2", "A", "B").season("2025").date("2025-05-01"),
        ]);
        let season = SeasonFilter::parse("2024");
        for recency in [None, Some(1), Some(20)] {
            let selection = select_matches(&rows, "A", &season, FINISHED_STATUS, recency);
            assert_eq!(ids(selection.all()), vec!["1"]);
        }
    }

    #[test]
    fn test_recency_limit_is_a_prefix_of_unlimited() {
        let rows: Vec<_> = (1..=30)
            .map(|i| row(&i.to_string(), "A", "B").date(&format!("2024-01-{:02}", i % 28 + 1)))
            .collect();
        let rows = load(rows);

        let unlimited = select_matches(&rows, "A", &SeasonFilter::All, FINISHED_STATUS, None);
        let limited = select_matches(&rows, "A", &SeasonFilter::All, FINISHED_STATUS, Some(20));
        assert_eq!(unlimited.len(), 30);
        assert_eq!(limited.len(), 20);
        assert_eq!(ids(limited.all()), ids(&unlimited.all()[..20]));
    }

    #[test]
    fn test_zero_recency_is_empty() {
        let rows = table();
        let selection = select_matches(&rows, "A", &SeasonFilter::All, FINISHED_STATUS, Some(0));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_matches_for_team_keeps_every_status() {
        let rows = table();
        let fixtures = matches_for_team(&rows, "A", &SeasonFilter::parse("2025"));
        assert_eq!(ids(&fixtures), vec!["4", "3", "6"]);
    }

    #[test]
    fn test_season_filter_parse() {
        assert_eq!(SeasonFilter::parse("ALL"), SeasonFilter::All);
        assert_eq!(SeasonFilter::parse(""), SeasonFilter::All);
        assert_eq!(SeasonFilter::parse(" 2024 "), SeasonFilter::Only("2024".into()));
    }
}

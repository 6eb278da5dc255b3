use crate::error::StatsError;
use crate::models::{MatchRecord, Metric, TeamStatLine};

/// Project a match onto `team`'s side of the fixture.
///
/// Every metric is read from the team's own column; the opponent's columns
/// are never consulted. Columns absent from the export read as 0.
pub fn map_to_team_perspective(row: &MatchRecord, team: &str) -> Result<TeamStatLine, StatsError> {
    let side = row.side_of(team).ok_or_else(|| StatsError::TeamNotInRecord {
        team: team.to_string(),
        match_id: row.id.clone(),
    })?;

    let mut line = TeamStatLine::default();
    for metric in Metric::ALL {
        line.set(metric, row.stats.get(metric, side).unwrap_or(0.0));
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{load, row};

    fn fixture() -> MatchRecord {
        load(vec![row("1", "A", "B")
            .cell("Goals Home", "2")
            .cell("Goals Away", "1")
            .cell("Possession Home", "55%")
            .cell("Possession Away", "40%")
            .cell("Yellow Cards Home", "3")
            .cell("Yellow cards Away", "1")
            .cell("Pass Accuracy Home", "81,5%")])
        .remove(0)
    }

    #[test]
    fn test_home_team_reads_home_columns() {
        let line = map_to_team_perspective(&fixture(), "A").unwrap();
        assert_eq!(line.goals_for, 2.0);
        assert_eq!(line.possession, 55.0);
        assert_eq!(line.yellow_cards, 3.0);
        assert_eq!(line.pass_accuracy, 81.5);
    }

    #[test]
    fn test_away_team_reads_away_columns() {
        let line = map_to_team_perspective(&fixture(), "B").unwrap();
        assert_eq!(line.goals_for, 1.0);
        // Read from its own column, not 100 - home.
        assert_eq!(line.possession, 40.0);
        assert_eq!(line.yellow_cards, 1.0);
        // Column missing from the export.
        assert_eq!(line.pass_accuracy, 0.0);
        assert_eq!(line.saves, 0.0);
    }

    #[test]
    fn test_unknown_team_is_an_error() {
        let err = map_to_team_perspective(&fixture(), "C").unwrap_err();
        match err {
            StatsError::TeamNotInRecord { team, match_id } => {
                assert_eq!(team, "C");
                assert_eq!(match_id, "1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_team_match_is_case_sensitive() {
        assert!(map_to_team_perspective(&fixture(), "a").is_err());
    }
}

use crate::error::StatsError;
use crate::models::{MatchRecord, Metric, TeamStatLine, TeamSummary};
use crate::services::map_to_team_perspective;
use crate::utils::{mean, round2};

/// Average `team`'s per-match figures over `rows`, each metric rounded to two decimals.
///
/// An empty input is an error: callers decide how to present "no matches".
pub fn aggregate<'a, I>(rows: I, team: &str) -> Result<TeamSummary, StatsError>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let lines = rows
        .into_iter()
        .map(|row| map_to_team_perspective(row, team))
        .collect::<Result<Vec<_>, _>>()?;

    if lines.is_empty() {
        return Err(StatsError::EmptyAggregationSet);
    }

    let mut stats = TeamStatLine::default();
    for metric in Metric::ALL {
        let values: Vec<f64> = lines.iter().map(|line| line.get(metric)).collect();
        let avg = mean(&values).ok_or(StatsError::EmptyAggregationSet)?;
        stats.set(metric, round2(avg));
    }

    Ok(TeamSummary {
        matches: lines.len(),
        stats,
    })
}

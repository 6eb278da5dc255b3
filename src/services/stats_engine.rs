use std::collections::BTreeSet;

use crate::error::StatsError;
use crate::models::{MatchRecord, TeamSummaries};
use crate::services::{aggregate, matches_for_team, select_matches, SeasonFilter, FINISHED_STATUS};
use crate::utils::results_to_form;

/// Distinct team names across home and away columns, sorted.
pub fn list_teams(matches: &[MatchRecord]) -> BTreeSet<String> {
    matches
        .iter()
        .flat_map(|m| [&m.home_team, &m.away_team])
        .filter(|name| !name.is_empty())
        .cloned()
        .collect()
}

/// Distinct seasons, latest first.
pub fn list_seasons(matches: &[MatchRecord]) -> Vec<String> {
    let seasons: BTreeSet<&str> = matches
        .iter()
        .map(|m| m.season.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    seasons.into_iter().rev().map(str::to_string).collect()
}

/// Overall, home and away averages for `team` over its finished matches.
///
/// `Ok(None)` means the filters left no matches. Home or away is `None` when
/// that split is empty.
pub fn compute_summaries(
    matches: &[MatchRecord],
    team: &str,
    season: &SeasonFilter,
    recency: Option<usize>,
) -> Result<Option<TeamSummaries>, StatsError> {
    let selection = select_matches(matches, team, season, FINISHED_STATUS, recency);
    if selection.is_empty() {
        tracing::debug!("No finished matches for {} with {:?}", team, season);
        return Ok(None);
    }

    let total = aggregate(selection.all().iter().copied(), team)?;

    let home_rows = selection.home();
    let home = if home_rows.is_empty() {
        None
    } else {
        Some(aggregate(home_rows, team)?)
    };

    let away_rows = selection.away();
    let away = if away_rows.is_empty() {
        None
    } else {
        Some(aggregate(away_rows, team)?)
    };

    let results: Vec<_> = selection
        .all()
        .iter()
        .filter_map(|m| m.result_for(team).map(|r| (r, m.date)))
        .collect();

    tracing::debug!(
        "Summarised {} matches for {} ({} home, {} away)",
        selection.len(),
        team,
        home.as_ref().map_or(0, |s| s.matches),
        away.as_ref().map_or(0, |s| s.matches)
    );

    Ok(Some(TeamSummaries {
        team: team.to_string(),
        total,
        home,
        away,
        form: results_to_form(&results),
    }))
}

/// The team's full match list for a season, scheduled and live matches included.
pub fn team_fixtures<'a>(
    matches: &'a [MatchRecord],
    team: &str,
    season: &SeasonFilter,
) -> Vec<&'a MatchRecord> {
    matches_for_team(matches, team, season)
}

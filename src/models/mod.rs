use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Which side of the fixture a team played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

/// Every per-side statistic the match export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Goals,
    Xg,
    Corners,
    Possession,
    ShotsOnTarget,
    TotalShots,
    ShotsOutsideBox,
    BlockedShots,
    ShotsInsideBox,
    Passes,
    PassAccuracy,
    Fouls,
    YellowCards,
    RedCards,
    Offsides,
    Saves,
}

impl Metric {
    pub const COUNT: usize = 16;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Goals,
        Metric::Xg,
        Metric::Corners,
        Metric::Possession,
        Metric::ShotsOnTarget,
        Metric::TotalShots,
        Metric::ShotsOutsideBox,
        Metric::BlockedShots,
        Metric::ShotsInsideBox,
        Metric::Passes,
        Metric::PassAccuracy,
        Metric::Fouls,
        Metric::YellowCards,
        Metric::RedCards,
        Metric::Offsides,
        Metric::Saves,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Source column labels as `(home, away)`.
    ///
    /// Labels are spelled out rather than built from a base name and the side
    /// suffix because the export is not consistent about them.
    pub fn columns(self) -> (&'static str, &'static str) {
        match self {
            Metric::Goals => ("Goals Home", "Goals Away"),
            Metric::Xg => ("xG Home", "xG Away"),
            Metric::Corners => ("Corners Home", "Corners Away"),
            Metric::Possession => ("Possession Home", "Possession Away"),
            Metric::ShotsOnTarget => ("Shots on Target Home", "Shots on Target Away"),
            Metric::TotalShots => ("Total Shots Home", "Total Shots Away"),
            Metric::ShotsOutsideBox => ("Shots outside box Home", "Shots outside box Away"),
            Metric::BlockedShots => ("Blocked Shots Home", "Blocked Shots Away"),
            Metric::ShotsInsideBox => ("Shots inside box Home", "Shots inside box Away"),
            Metric::Passes => ("Passes Home", "Passes Away"),
            Metric::PassAccuracy => ("Pass Accuracy Home", "Pass Accuracy Away"),
            Metric::Fouls => ("Fouls Home", "Fouls Away"),
            // Schema quirk: the sheet capitalises "Cards" on the home column only.
            Metric::YellowCards => ("Yellow Cards Home", "Yellow cards Away"),
            Metric::RedCards => ("Red Cards Home", "Red Cards Away"),
            Metric::Offsides => ("Offsides Home", "Offsides Away"),
            Metric::Saves => ("Saves Home", "Saves Away"),
        }
    }

    pub fn column(self, side: Side) -> &'static str {
        let (home, away) = self.columns();
        match side {
            Side::Home => home,
            Side::Away => away,
        }
    }

    /// Resolve a trimmed header label back to its metric and side.
    pub fn from_column(label: &str) -> Option<(Metric, Side)> {
        Metric::ALL.iter().find_map(|&metric| {
            let (home, away) = metric.columns();
            if label == home {
                Some((metric, Side::Home))
            } else if label == away {
                Some((metric, Side::Away))
            } else {
                None
            }
        })
    }
}

/// Home and away readings of one metric. `None` means the export had no such column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SidePair {
    pub home: Option<f64>,
    pub away: Option<f64>,
}

impl SidePair {
    pub fn get(&self, side: Side) -> Option<f64> {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn set(&mut self, side: Side, value: f64) {
        match side {
            Side::Home => self.home = Some(value),
            Side::Away => self.away = Some(value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchStats {
    pairs: [SidePair; Metric::COUNT],
}

impl MatchStats {
    pub fn pair(&self, metric: Metric) -> SidePair {
        self.pairs[metric.index()]
    }

    pub fn get(&self, metric: Metric, side: Side) -> Option<f64> {
        self.pairs[metric.index()].get(side)
    }

    pub fn set(&mut self, metric: Metric, side: Side, value: f64) {
        self.pairs[metric.index()].set(side, value);
    }
}

// Serialised with the source column labels so the listing mirrors the sheet.
impl Serialize for MatchStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for metric in Metric::ALL {
            for side in [Side::Home, Side::Away] {
                if let Some(value) = self.get(metric, side) {
                    map.serialize_entry(metric.column(side), &value)?;
                }
            }
        }
        map.end()
    }
}

/// One normalized row of the match export.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub id: String,
    pub date: Option<NaiveDateTime>,
    pub home_team: String,
    pub away_team: String,
    pub status: String,
    pub season: String,
    pub stats: MatchStats,
    /// Columns the loader does not interpret, kept verbatim.
    pub extras: BTreeMap<String, String>,
}

impl MatchRecord {
    pub fn side_of(&self, team: &str) -> Option<Side> {
        if self.home_team == team {
            Some(Side::Home)
        } else if self.away_team == team {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.side_of(team).is_some()
    }

    /// Result letter ('W', 'D', 'L') for `team`, if both goal columns are present.
    pub fn result_for(&self, team: &str) -> Option<char> {
        let side = self.side_of(team)?;
        let goals = self.stats.pair(Metric::Goals);
        let (home, away) = (goals.home?, goals.away?);
        let (scored, conceded) = match side {
            Side::Home => (home, away),
            Side::Away => (away, home),
        };
        Some(match scored.partial_cmp(&conceded) {
            Some(std::cmp::Ordering::Greater) => 'W',
            Some(std::cmp::Ordering::Less) => 'L',
            _ => 'D',
        })
    }
}

/// A match seen from one team's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TeamStatLine {
    pub goals_for: f64,
    pub xg: f64,
    pub corners: f64,
    pub possession: f64,
    pub shots_on_target: f64,
    pub total_shots: f64,
    pub shots_outside_box: f64,
    pub blocked_shots: f64,
    pub shots_inside_box: f64,
    pub passes: f64,
    pub pass_accuracy: f64,
    pub fouls: f64,
    pub yellow_cards: f64,
    pub red_cards: f64,
    pub offsides: f64,
    pub saves: f64,
}

impl TeamStatLine {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Goals => self.goals_for,
            Metric::Xg => self.xg,
            Metric::Corners => self.corners,
            Metric::Possession => self.possession,
            Metric::ShotsOnTarget => self.shots_on_target,
            Metric::TotalShots => self.total_shots,
            Metric::ShotsOutsideBox => self.shots_outside_box,
            Metric::BlockedShots => self.blocked_shots,
            Metric::ShotsInsideBox => self.shots_inside_box,
            Metric::Passes => self.passes,
            Metric::PassAccuracy => self.pass_accuracy,
            Metric::Fouls => self.fouls,
            Metric::YellowCards => self.yellow_cards,
            Metric::RedCards => self.red_cards,
            Metric::Offsides => self.offsides,
            Metric::Saves => self.saves,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Goals => &mut self.goals_for,
            Metric::Xg => &mut self.xg,
            Metric::Corners => &mut self.corners,
            Metric::Possession => &mut self.possession,
            Metric::ShotsOnTarget => &mut self.shots_on_target,
            Metric::TotalShots => &mut self.total_shots,
            Metric::ShotsOutsideBox => &mut self.shots_outside_box,
            Metric::BlockedShots => &mut self.blocked_shots,
            Metric::ShotsInsideBox => &mut self.shots_inside_box,
            Metric::Passes => &mut self.passes,
            Metric::PassAccuracy => &mut self.pass_accuracy,
            Metric::Fouls => &mut self.fouls,
            Metric::YellowCards => &mut self.yellow_cards,
            Metric::RedCards => &mut self.red_cards,
            Metric::Offsides => &mut self.offsides,
            Metric::Saves => &mut self.saves,
        };
        *slot = value;
    }
}

/// Per-metric means over a set of matches, rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub matches: usize,
    #[serde(flatten)]
    pub stats: TeamStatLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummaries {
    pub team: String,
    pub total: TeamSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<TeamSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away: Option<TeamSummary>,
    /// Last five results, most recent first (e.g. "WWDLW").
    pub form: String,
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yellow_card_columns_differ_by_side() {
        assert_eq!(Metric::YellowCards.column(Side::Home), "Yellow Cards Home");
        assert_eq!(Metric::YellowCards.column(Side::Away), "Yellow cards Away");
        assert_eq!(
            Metric::from_column("Yellow cards Away"),
            Some((Metric::YellowCards, Side::Away))
        );
        assert_eq!(Metric::from_column("Yellow Cards Away"), None);
    }

    #[test]
    fn test_metric_index_matches_all_order() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn test_stat_line_get_set() {
        let mut line = TeamStatLine::default();
        for (i, metric) in Metric::ALL.iter().enumerate() {
            line.set(*metric, i as f64);
        }
        assert_eq!(line.goals_for, 0.0);
        assert_eq!(line.saves, 15.0);
        assert_eq!(line.get(Metric::PassAccuracy), 10.0);
    }

    #[test]
    fn test_summaries_omit_empty_splits() {
        let total = TeamSummary {
            matches: 1,
            stats: TeamStatLine {
                goals_for: 2.0,
                ..TeamStatLine::default()
            },
        };
        let summaries = TeamSummaries {
            team: "A".to_string(),
            total: total.clone(),
            home: Some(total),
            away: None,
            form: "W".to_string(),
        };

        let json = serde_json::to_value(&summaries).unwrap();
        assert_eq!(json["total"]["matches"], 1);
        assert_eq!(json["total"]["goals_for"], 2.0);
        assert!(json.get("home").is_some());
        assert!(json.get("away").is_none());
    }

    #[test]
    fn test_match_stats_serialize_with_source_labels() {
        let mut stats = MatchStats::default();
        stats.set(Metric::YellowCards, Side::Away, 3.0);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["Yellow cards Away"], 3.0);
        assert!(json.get("Yellow Cards Home").is_none());
    }
}

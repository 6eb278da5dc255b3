use std::collections::{BTreeMap, HashSet};
use std::env;
use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use csv::StringRecord;
use reqwest::Client;

use crate::error::FetchError;
use crate::models::{MatchRecord, MatchStats, Metric, Side};
use crate::services::{normalize, MatchCache};
use crate::utils::parse_match_date;

pub const FEED_URL_VAR: &str = "MATCH_FEED_URL";

const ID_COLUMN: &str = "Match ID";
const DATE_COLUMN: &str = "Date";
const HOME_TEAM_COLUMN: &str = "Home Team";
const AWAY_TEAM_COLUMN: &str = "Away Team";
const STATUS_COLUMN: &str = "Status";
const SEASON_COLUMN: &str = "Season";

// ── Column layout ────────────────────────────────────────────────────────────

/// Where each known column sits in this particular export.
struct ColumnLayout {
    id: usize,
    date: Option<usize>,
    home_team: usize,
    away_team: usize,
    status: Option<usize>,
    season: Option<usize>,
    metrics: Vec<(usize, Metric, Side)>,
    extras: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self, FetchError> {
        let mut id = None;
        let mut date = None;
        let mut home_team = None;
        let mut away_team = None;
        let mut status = None;
        let mut season = None;
        let mut metrics = Vec::new();
        let mut extras = Vec::new();
        let mut seen = HashSet::new();

        for (idx, label) in headers.iter().enumerate() {
            let label = label.trim_start_matches('\u{feff}').trim();
            // First occurrence wins if the sheet repeats a header.
            if label.is_empty() || !seen.insert(label.to_string()) {
                continue;
            }

            match label {
                ID_COLUMN => id = Some(idx),
                DATE_COLUMN => date = Some(idx),
                HOME_TEAM_COLUMN => home_team = Some(idx),
                AWAY_TEAM_COLUMN => away_team = Some(idx),
                STATUS_COLUMN => status = Some(idx),
                SEASON_COLUMN => season = Some(idx),
                _ => match Metric::from_column(label) {
                    Some((metric, side)) => metrics.push((idx, metric, side)),
                    None => extras.push((idx, label.to_string())),
                },
            }
        }

        Ok(Self {
            id: id.ok_or(FetchError::MissingColumn(ID_COLUMN))?,
            date,
            home_team: home_team.ok_or(FetchError::MissingColumn(HOME_TEAM_COLUMN))?,
            away_team: away_team.ok_or(FetchError::MissingColumn(AWAY_TEAM_COLUMN))?,
            status,
            season,
            metrics,
            extras,
        })
    }

    fn missing_metric_columns(&self) -> Vec<&'static str> {
        let present: HashSet<(Metric, Side)> =
            self.metrics.iter().map(|&(_, metric, side)| (metric, side)).collect();

        Metric::ALL
            .iter()
            .flat_map(|&metric| [(metric, Side::Home), (metric, Side::Away)])
            .filter(|key| !present.contains(key))
            .map(|(metric, side)| metric.column(side))
            .collect()
    }
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).map(str::trim).unwrap_or("")
}

fn optional_cell(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.map_or("", |idx| cell(record, idx))
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse a CSV export into normalized match records.
///
/// Rows without a match id are dropped. Statistic cells go through
/// [`normalize`]; statistic columns the export lacks stay unset.
pub fn parse_matches(text: &str) -> Result<Vec<MatchRecord>, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let layout = ColumnLayout::from_headers(reader.headers()?)?;

    let missing = layout.missing_metric_columns();
    if !missing.is_empty() {
        tracing::warn!(
            "Match feed lacks {} statistic columns, reading them as 0: {}",
            missing.len(),
            missing.join(", ")
        );
    }

    let mut matches = Vec::new();
    let mut dropped = 0usize;

    for record in reader.records() {
        let record = record?;

        let id = cell(&record, layout.id);
        if id.is_empty() {
            dropped += 1;
            continue;
        }

        let mut stats = MatchStats::default();
        for &(idx, metric, side) in &layout.metrics {
            stats.set(metric, side, normalize(cell(&record, idx)));
        }

        let extras: BTreeMap<String, String> = layout
            .extras
            .iter()
            .map(|(idx, label)| (label.clone(), cell(&record, *idx).to_string()))
            .collect();

        matches.push(MatchRecord {
            id: id.to_string(),
            date: parse_match_date(optional_cell(&record, layout.date)),
            home_team: cell(&record, layout.home_team).to_string(),
            away_team: cell(&record, layout.away_team).to_string(),
            status: optional_cell(&record, layout.status).to_string(),
            season: optional_cell(&record, layout.season).to_string(),
            stats,
            extras,
        });
    }

    if dropped > 0 {
        tracing::debug!("Dropped {} rows without a match id", dropped);
    }

    Ok(matches)
}

// ── DataFetcher ──────────────────────────────────────────────────────────────

pub struct DataFetcher {
    client: Client,
    feed_url: String,
    cache: Arc<MatchCache>,
}

impl DataFetcher {
    pub fn new(feed_url: impl Into<String>, cache: Arc<MatchCache>) -> Self {
        Self {
            client: Client::new(),
            feed_url: feed_url.into(),
            cache,
        }
    }

    pub fn from_env(cache: Arc<MatchCache>) -> anyhow::Result<Self> {
        let feed_url = env::var(FEED_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow!("{} not set", FEED_URL_VAR))?;
        Ok(Self::new(feed_url, cache))
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Current match table, fetching the feed only when the cached snapshot has expired.
    pub async fn load_matches(&self) -> Result<Arc<Vec<MatchRecord>>, FetchError> {
        if let Some(matches) = self.cache.get(Utc::now()) {
            tracing::debug!("Match cache hit ({} rows)", matches.len());
            return Ok(matches);
        }

        tracing::debug!("Match cache miss, fetching {}", self.feed_url);
        let matches = match self.fetch_matches().await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Match feed fetch failed: {}", e);
                return Err(e);
            }
        };

        tracing::info!("Loaded {} matches from feed", matches.len());
        Ok(self.cache.store(matches, Utc::now()))
    }

    /// Drop the cached snapshot and load a fresh one.
    pub async fn refresh(&self) -> Result<Arc<Vec<MatchRecord>>, FetchError> {
        self.cache.invalidate();
        self.load_matches().await
    }

    async fn fetch_matches(&self) -> Result<Vec<MatchRecord>, FetchError> {
        let response = self
            .client
            .get(&self.feed_url)
            .timeout(std::time::Duration::from_secs(20))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        parse_matches(&body)
    }
}

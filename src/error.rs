use thiserror::Error;

/// The match feed could not be turned into a table. Nothing is rendered.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to match feed failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("match feed returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("match feed is not valid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("match feed has no '{0}' column")]
    MissingColumn(&'static str),
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("could not load match data: {0}")]
    Fetch(#[from] FetchError),

    #[error("team '{team}' did not play in match {match_id}")]
    TeamNotInRecord { team: String, match_id: String },

    #[error("no matches to aggregate")]
    EmptyAggregationSet,
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::models::{ApiResponse, MatchRecord, TeamSummaries};
use crate::services::{
    compute_summaries, list_seasons, list_teams, team_fixtures, DataFetcher, SeasonFilter,
};

const LOAD_FAILED: &str = "could not load match data";

type ApiError = (StatusCode, Json<ApiResponse<()>>);
type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<DataFetcher>,
}

impl AppState {
    pub fn new(fetcher: DataFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

pub async fn serve(port: u16, state: AppState) -> anyhow::Result<()> {
    let app = create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Team stats API listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/matches", get(list_matches_handler))
        .route("/teams", get(list_teams_handler))
        .route("/seasons", get(list_seasons_handler))
        .route("/teams/{team}/summary", get(team_summary_handler))
        .route("/teams/{team}/matches", get(team_matches_handler))
        .route("/data/refresh", post(refresh_data_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message.into())))
}

async fn load_snapshot(state: &AppState) -> Result<Arc<Vec<MatchRecord>>, ApiError> {
    state.fetcher.load_matches().await.map_err(|e| {
        tracing::error!("Failed to load match data: {}", e);
        api_error(StatusCode::SERVICE_UNAVAILABLE, LOAD_FAILED)
    })
}

/// `None`, empty or "all" mean no limit.
fn parse_recency(raw: Option<&str>) -> Result<Option<usize>, String> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(None);
    };
    if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(format!("invalid recency '{}': expected a positive number or 'all'", raw)),
    }
}

// Health check endpoint
async fn health_check() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("Team stats API is running"))
}

// GET /matches - Full normalized match table
async fn list_matches_handler(State(state): State<AppState>) -> ApiResult<Vec<MatchRecord>> {
    let matches = load_snapshot(&state).await?;
    Ok(Json(ApiResponse::success(matches.to_vec())))
}

// GET /teams
async fn list_teams_handler(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let matches = load_snapshot(&state).await?;
    Ok(Json(ApiResponse::success(list_teams(&matches).into_iter().collect())))
}

// GET /seasons - Latest first
async fn list_seasons_handler(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let matches = load_snapshot(&state).await?;
    Ok(Json(ApiResponse::success(list_seasons(&matches))))
}

#[derive(Debug, Default, Deserialize)]
struct SummaryQuery {
    season: Option<String>,
    recency: Option<String>,
}

// GET /teams/{team}/summary?season=2024&recency=20
async fn team_summary_handler(
    State(state): State<AppState>,
    Path(team): Path<String>,
    Query(params): Query<SummaryQuery>,
) -> ApiResult<TeamSummaries> {
    let recency = parse_recency(params.recency.as_deref())
        .map_err(|msg| api_error(StatusCode::BAD_REQUEST, msg))?;
    let season = SeasonFilter::parse(params.season.as_deref().unwrap_or(""));

    let matches = load_snapshot(&state).await?;

    match compute_summaries(&matches, &team, &season, recency) {
        Ok(Some(summaries)) => Ok(Json(ApiResponse::success(summaries))),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("no finished matches for {} with the selected filters", team),
        )),
        Err(e) => {
            tracing::error!("Failed to summarise {}: {}", team, e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FixturesQuery {
    season: Option<String>,
}

// GET /teams/{team}/matches - Every status, newest first
async fn team_matches_handler(
    State(state): State<AppState>,
    Path(team): Path<String>,
    Query(params): Query<FixturesQuery>,
) -> ApiResult<Vec<MatchRecord>> {
    let season = SeasonFilter::parse(params.season.as_deref().unwrap_or(""));
    let matches = load_snapshot(&state).await?;

    let fixtures: Vec<MatchRecord> = team_fixtures(&matches, &team, &season)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::success(fixtures)))
}

// POST /data/refresh - Drop the cached table and reload it
async fn refresh_data_handler(State(state): State<AppState>) -> ApiResult<String> {
    match state.fetcher.refresh().await {
        Ok(matches) => Ok(Json(ApiResponse::success(format!(
            "Loaded {} matches",
            matches.len()
        )))),
        Err(e) => {
            tracing::error!("Failed to refresh match data: {}", e);
            Err(api_error(StatusCode::SERVICE_UNAVAILABLE, LOAD_FAILED))
        }
    }
}

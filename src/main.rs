mod api;
mod error;
mod models;
mod services;
mod utils;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use crate::services::{DataFetcher, MatchCache, DEFAULT_TTL_SECS};

#[derive(Parser)]
#[command(name = "teamstats")]
#[command(about = "Per-team match statistics served from a spreadsheet export")]
struct Cli {
    /// Port for the JSON API
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Seconds a loaded match table stays fresh
    #[arg(long, default_value_t = DEFAULT_TTL_SECS)]
    cache_ttl: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let cache = Arc::new(MatchCache::new(chrono::Duration::seconds(cli.cache_ttl.max(0))));
    let ttl_secs = cache.ttl().num_seconds();
    let fetcher = DataFetcher::from_env(cache)?;
    tracing::info!(
        "Reading matches from {} (cache ttl {}s)",
        fetcher.feed_url(),
        ttl_secs
    );

    // Warm the cache; a failure here is not fatal, requests retry the fetch.
    if let Err(e) = fetcher.load_matches().await {
        tracing::warn!("Initial match load failed: {}", e);
    }

    api::serve(cli.port, api::AppState::new(fetcher)).await
}

//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::aggregate::GameAggregator;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::enrich::BatchEnricher;
use crate::error::{AppError, Result};
use crate::models::{
    GamePk, GamesParams, GamesResponse, HealthResponse, PeopleParams, Schedule, ScheduleParams,
    StatsResponse,
};
use crate::resolver::CachedResolver;
use crate::upstream::{HttpStatsApi, StatsApi};

/// Response header telling whether the payload came from the cache.
pub const CACHE_HEADER: &str = "x-cache";

fn cache_status(from_cache: bool) -> [(&'static str, &'static str); 1] {
    [(CACHE_HEADER, if from_cache { "HIT" } else { "MISS" })]
}

/// Application state shared across all handlers.
///
/// The cache store is created once per process and shared by every
/// pipeline stage through `Arc<RwLock<_>>`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<RwLock<CacheStore>>,
    pub resolver: CachedResolver,
    pub enricher: BatchEnricher,
    pub aggregator: GameAggregator,
    /// Directory of static client assets, if any are served
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Wires the pipeline around `cache` and `upstream`.
    pub fn new(cache: CacheStore, upstream: Arc<dyn StatsApi>, batch_size: usize) -> Self {
        let cache = Arc::new(RwLock::new(cache));
        let resolver = CachedResolver::new(cache.clone(), upstream);
        let enricher = BatchEnricher::new(resolver.clone(), batch_size);
        let aggregator = GameAggregator::new(enricher.clone());
        Self {
            cache,
            resolver,
            enricher,
            aggregator,
            static_dir: None,
        }
    }

    /// Creates a new AppState from configuration, talking to the real API.
    pub fn from_config(config: &Config) -> std::result::Result<Self, reqwest::Error> {
        let upstream = HttpStatsApi::new(
            config.upstream_base_url.clone(),
            Duration::from_secs(config.upstream_timeout),
        )?;
        let cache = CacheStore::with_ttl_secs(config.default_ttl);
        Ok(Self::new(cache, Arc::new(upstream), config.people_batch_size)
            .with_static_dir(&config.static_dir))
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

/// Handler for GET /api/schedule?date=YYYY-MM-DD
pub async fn schedule_handler(
    State(state): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> Result<impl IntoResponse> {
    let date = params.validate().map_err(AppError::Validation)?;
    let resolved = state.resolver.schedule(date).await?;

    Ok((cache_status(resolved.from_cache), Json(resolved.value)))
}

/// Handler for GET /api/gamefeed/:game_pk
pub async fn gamefeed_handler(
    State(state): State<AppState>,
    Path(game_pk): Path<String>,
) -> Result<impl IntoResponse> {
    let game_pk = GamePk::parse(&game_pk)
        .ok_or_else(|| AppError::Validation(format!("Invalid gamePk: '{game_pk}'")))?;
    let resolved = state.resolver.game_feed(&game_pk).await?;

    Ok((cache_status(resolved.from_cache), Json(resolved.value)))
}

/// Handler for GET /api/people?personIds=1,2,3
///
/// Large id lists are split into batches; the response merges every batch
/// that succeeded.
pub async fn people_handler(
    State(state): State<AppState>,
    Query(params): Query<PeopleParams>,
) -> Result<impl IntoResponse> {
    let ids = params.validate().map_err(AppError::Validation)?;
    let report = state.enricher.fetch_batches(&ids).await?;

    let all_cached = report.batches > 0 && report.cached_batches == report.batches;
    Ok((cache_status(all_cached), Json(report.merged_payload())))
}

/// Handler for GET /api/games?date=YYYY-MM-DD&nationality=VEN
///
/// Fails as a whole only when the schedule cannot be fetched.
pub async fn games_handler(
    State(state): State<AppState>,
    Query(params): Query<GamesParams>,
) -> Result<Json<GamesResponse>> {
    let (date, filter) = params.validate().map_err(AppError::Validation)?;

    let schedule = state.resolver.schedule(date).await?;
    let games = Schedule::from_value(&schedule.value)
        .map_err(|e| AppError::Internal(format!("Unexpected schedule payload: {e}")))?
        .into_games();

    info!(
        %date,
        games = games.games.len(),
        unreadable = games.rejected.len(),
        filter = ?filter,
        "Aggregating games"
    );
    let report = state
        .aggregator
        .aggregate_schedule(&games, filter.as_deref())
        .await;

    Ok(Json(GamesResponse {
        date: date.format("%Y-%m-%d").to_string(),
        schedule_from_cache: schedule.from_cache,
        total_games: games.total(),
        report,
    }))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(
        &cache.stats(),
        cache.default_ttl().as_secs(),
    ))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

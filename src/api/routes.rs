//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    gamefeed_handler, games_handler, health_handler, people_handler, schedule_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/schedule?date=` - Schedule for a date (cached proxy)
/// - `GET /api/gamefeed/:game_pk` - Live feed for a game (cached proxy)
/// - `GET /api/people?personIds=` - People lookup, batched (cached proxy)
/// - `GET /api/games?date=&nationality=` - Per-game roster nationalities
/// - `GET /api/cache/stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// Anything else is served from the static client directory when one is set.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route("/api/schedule", get(schedule_handler))
        .route("/api/gamefeed/:game_pk", get(gamefeed_handler))
        .route("/api/people", get(people_handler))
        .route("/api/games", get(games_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/health", get(health_handler));

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! API Module
//!
//! HTTP handlers and routing for the proxy's REST API.
//!
//! # Endpoints
//! - `GET /api/schedule` - Schedule for a date
//! - `GET /api/gamefeed/:game_pk` - Live feed for a game
//! - `GET /api/people` - People by id, batched
//! - `GET /api/games` - Per-game nationality aggregation
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

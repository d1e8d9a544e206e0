//! Data model
//!
//! Identifiers, typed views over upstream payloads, and the DTOs used for
//! the service's own request/response bodies.

pub mod ids;
pub mod mlb;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use ids::{join_ids, GamePk, PersonId};
pub use mlb::{EnrichedPlayer, Game, GameStatus, RejectedGame, Schedule, ScheduleGames};
pub use requests::{GamesParams, PeopleParams, ScheduleParams};
pub use responses::{GamesResponse, HealthResponse, StatsResponse};

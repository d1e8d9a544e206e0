//! Ballpark Proxy - caching front for the MLB stats API
//!
//! Proxies schedule, live-feed and people lookups through a TTL cache,
//! splits large people lookups into batches, and aggregates per-game roster
//! nationalities while tolerating partial upstream failure.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod config;
pub mod enrich;
pub mod error;
pub mod models;
pub mod resolver;
pub mod tasks;
pub mod upstream;

#[cfg(test)]
mod test_support;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;

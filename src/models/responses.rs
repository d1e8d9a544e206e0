//! Response DTOs for the proxy API
//!
//! Proxy endpoints return upstream JSON verbatim; these types cover the
//! service's own endpoints.

use serde::Serialize;

use crate::aggregate::AggregateReport;
use crate::cache::CacheStats;

/// Response body for `GET /api/cache/stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
    pub default_ttl_secs: u64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, default_ttl_secs: u64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            stores: stats.stores,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            default_ttl_secs,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for `GET /api/games`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesResponse {
    pub date: String,
    pub schedule_from_cache: bool,
    pub total_games: usize,
    #[serde(flatten)]
    pub report: AggregateReport,
}

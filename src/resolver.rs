//! Cached Resource Resolver
//!
//! Puts the cache in front of every upstream call. Successful payloads are
//! stored under a deterministic key; failures are never stored, so the next
//! request for the same key goes upstream again.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{keys, CacheStore};
use crate::error::{ResourceKind, UpstreamError};
use crate::models::{GamePk, PersonId};
use crate::upstream::StatsApi;

// == Resource Query ==
/// One cacheable upstream request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceQuery {
    Schedule(NaiveDate),
    GameFeed(GamePk),
    /// A single batch of person ids, already within the batch size.
    People(Vec<PersonId>),
}

impl ResourceQuery {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceQuery::Schedule(_) => ResourceKind::Schedule,
            ResourceQuery::GameFeed(_) => ResourceKind::GameFeed,
            ResourceQuery::People(_) => ResourceKind::People,
        }
    }

    pub fn cache_key(&self) -> String {
        match self {
            ResourceQuery::Schedule(date) => keys::schedule_key(date),
            ResourceQuery::GameFeed(game_pk) => keys::gamefeed_key(game_pk),
            ResourceQuery::People(ids) => keys::people_key(ids),
        }
    }
}

/// A resolved payload and whether it came from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub value: Value,
    pub from_cache: bool,
}

// == Cached Resolver ==
#[derive(Clone)]
pub struct CachedResolver {
    cache: Arc<RwLock<CacheStore>>,
    upstream: Arc<dyn StatsApi>,
}

impl CachedResolver {
    pub fn new(cache: Arc<RwLock<CacheStore>>, upstream: Arc<dyn StatsApi>) -> Self {
        Self { cache, upstream }
    }

    pub fn cache(&self) -> &Arc<RwLock<CacheStore>> {
        &self.cache
    }

    /// Returns the cached payload for `query`, or fetches and caches it.
    ///
    /// Upstream errors propagate unchanged and leave the cache untouched.
    pub async fn resolve(&self, query: &ResourceQuery) -> Result<Resolved, UpstreamError> {
        let key = query.cache_key();

        // Presence check and read happen under one lock.
        let cached = {
            let mut cache = self.cache.write().await;
            cache.get(&key)
        };
        if let Some(value) = cached {
            debug!(%key, "Cache hit");
            return Ok(Resolved {
                value,
                from_cache: true,
            });
        }

        info!(%key, "Cache miss, fetching from upstream");
        let fetched = match query {
            ResourceQuery::Schedule(date) => self.upstream.fetch_schedule(*date).await,
            ResourceQuery::GameFeed(game_pk) => self.upstream.fetch_game_feed(game_pk).await,
            ResourceQuery::People(ids) => self.upstream.fetch_people_batch(ids).await,
        };

        let value = match fetched {
            Ok(value) => value,
            Err(err) => {
                warn!(%key, error = %err, "Upstream fetch failed, nothing cached");
                return Err(err);
            }
        };

        {
            let mut cache = self.cache.write().await;
            cache.set(key.clone(), value.clone(), None);
        }
        debug!(%key, "Stored upstream payload");

        Ok(Resolved {
            value,
            from_cache: false,
        })
    }

    pub async fn schedule(&self, date: NaiveDate) -> Result<Resolved, UpstreamError> {
        self.resolve(&ResourceQuery::Schedule(date)).await
    }

    pub async fn game_feed(&self, game_pk: &GamePk) -> Result<Resolved, UpstreamError> {
        self.resolve(&ResourceQuery::GameFeed(game_pk.clone())).await
    }

    pub async fn people_batch(&self, ids: &[PersonId]) -> Result<Resolved, UpstreamError> {
        self.resolve(&ResourceQuery::People(ids.to_vec())).await
    }
}

//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, Router};
use ballpark_proxy::api::create_router;
use ballpark_proxy::cache::CacheStore;
use ballpark_proxy::error::{ResourceKind, UpstreamError};
use ballpark_proxy::models::{GamePk, PersonId};
use ballpark_proxy::upstream::StatsApi;
use ballpark_proxy::AppState;
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Scripted stats API that counts every call it receives.
#[derive(Default)]
pub struct CountingApi {
    pub schedule_calls: AtomicUsize,
    pub feed_calls: AtomicUsize,
    pub people_calls: AtomicUsize,
    pub people_batches: Mutex<Vec<usize>>,
    pub fail_schedule: AtomicBool,
    pub failing_feeds: Mutex<HashSet<String>>,
    pub failing_people: Mutex<HashSet<u64>>,
}

impl CountingApi {
    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn feed_calls(&self) -> usize {
        self.feed_calls.load(Ordering::SeqCst)
    }

    pub fn people_calls(&self) -> usize {
        self.people_calls.load(Ordering::SeqCst)
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.people_batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatsApi for CountingApi {
    async fn fetch_schedule(&self, date: NaiveDate) -> Result<Value, UpstreamError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(UpstreamError::new(
                ResourceKind::Schedule,
                Some(503),
                "Service Unavailable",
            ));
        }
        let day = date.format("%Y-%m-%d").to_string();
        Ok(json!({
            "totalGames": 3,
            "dates": [{
                "date": day,
                "games": [
                    {"gamePk": 101, "status": {"detailedState": "Scheduled"}},
                    {"gamePk": 102, "status": {"detailedState": "Scheduled"}},
                    {"gamePk": 103, "status": {"detailedState": "Final"}}
                ]
            }]
        }))
    }

    async fn fetch_game_feed(&self, game_pk: &GamePk) -> Result<Value, UpstreamError> {
        self.feed_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_feeds.lock().unwrap().contains(game_pk.as_str()) {
            return Err(UpstreamError::new(ResourceKind::GameFeed, Some(500), "boom"));
        }
        // Game 10N rosters players 3N-2, 3N-1 and 3N.
        let n: u64 = game_pk.as_str().parse::<u64>().unwrap_or(0) % 100;
        let first = n.saturating_sub(1) * 3 + 1;
        Ok(json!({
            "gamePk": game_pk,
            "gameData": {"status": {"abstractGameState": "Final", "detailedState": "Final"}},
            "liveData": {
                "linescore": {"currentInning": 9},
                "boxscore": {"teams": {
                    "away": {"players": {format!("ID{first}"): {}, format!("ID{}", first + 1): {}}},
                    "home": {"players": {format!("ID{}", first + 2): {}}}
                }}
            }
        }))
    }

    async fn fetch_people_batch(&self, ids: &[PersonId]) -> Result<Value, UpstreamError> {
        self.people_calls.fetch_add(1, Ordering::SeqCst);
        self.people_batches.lock().unwrap().push(ids.len());
        let failing = self.failing_people.lock().unwrap();
        if ids.iter().any(|id| failing.contains(&id.0)) {
            return Err(UpstreamError::new(ResourceKind::People, Some(502), "Bad Gateway"));
        }
        let people: Vec<Value> = ids
            .iter()
            .map(|id| {
                let country = if id.0 % 2 == 0 { "Venezuela" } else { "Japan" };
                json!({"id": id.0, "fullName": format!("Player {}", id.0), "birthCountry": country})
            })
            .collect();
        Ok(json!({"copyright": "Copyright MLB", "people": people}))
    }
}

pub fn create_test_app(api: Arc<CountingApi>) -> Router {
    create_test_app_with_cache(api, CacheStore::with_ttl_secs(300))
}

pub fn create_test_app_with_cache(api: Arc<CountingApi>, cache: CacheStore) -> Router {
    create_router(AppState::new(cache, api, 40))
}

pub async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

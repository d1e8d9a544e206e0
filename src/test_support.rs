//! In-memory [`StatsApi`] double with per-resource call counters.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::error::{ResourceKind, UpstreamError};
use crate::models::{GamePk, PersonId};
use crate::upstream::StatsApi;

#[derive(Default)]
pub struct FakeStatsApi {
    schedule_calls: AtomicUsize,
    feed_calls: AtomicUsize,
    people_calls: AtomicUsize,
    fail_schedule: AtomicBool,
    schedule: Mutex<Option<Value>>,
    feeds: Mutex<HashMap<String, Value>>,
    failing_feeds: Mutex<HashSet<String>>,
    failing_people: Mutex<HashSet<u64>>,
    countries: Mutex<HashMap<u64, String>>,
    batches: Mutex<Vec<Vec<PersonId>>>,
}

impl FakeStatsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule_calls(&self) -> usize {
        self.schedule_calls.load(Ordering::SeqCst)
    }

    pub fn feed_calls(&self) -> usize {
        self.feed_calls.load(Ordering::SeqCst)
    }

    pub fn people_calls(&self) -> usize {
        self.people_calls.load(Ordering::SeqCst)
    }

    /// Id lists of every people call, in call order.
    pub fn batches(&self) -> Vec<Vec<PersonId>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn fail_schedule(&self, fail: bool) {
        self.fail_schedule.store(fail, Ordering::SeqCst);
    }

    pub fn set_schedule(&self, payload: Value) {
        *self.schedule.lock().unwrap() = Some(payload);
    }

    pub fn set_feed(&self, game_pk: u64, away: &[u64], home: &[u64]) {
        self.feeds
            .lock()
            .unwrap()
            .insert(game_pk.to_string(), roster_feed(away, home));
    }

    pub fn fail_feed(&self, game_pk: u64) {
        self.failing_feeds
            .lock()
            .unwrap()
            .insert(game_pk.to_string());
    }

    /// Any people batch containing `id` fails.
    pub fn fail_people_containing(&self, id: u64) {
        self.failing_people.lock().unwrap().insert(id);
    }

    pub fn set_country(&self, id: u64, country: &str) {
        self.countries
            .lock()
            .unwrap()
            .insert(id, country.to_string());
    }
}

/// Live feed payload with the given boxscore rosters.
pub fn roster_feed(away: &[u64], home: &[u64]) -> Value {
    let players = |ids: &[u64]| -> Value {
        let map: Map<String, Value> = ids
            .iter()
            .map(|id| (format!("ID{id}"), json!({"person": {"id": id}})))
            .collect();
        Value::Object(map)
    };

    json!({
        "gameData": {"status": {"abstractGameState": "Live", "detailedState": "In Progress"}},
        "liveData": {
            "linescore": {"currentInning": 5},
            "boxscore": {"teams": {
                "away": {"players": players(away)},
                "home": {"players": players(home)}
            }}
        }
    })
}

/// Schedule payload listing `game_pks` on one date.
pub fn schedule_payload(game_pks: &[u64]) -> Value {
    let games: Vec<Value> = game_pks
        .iter()
        .map(|pk| json!({"gamePk": pk, "status": {"detailedState": "Scheduled"}}))
        .collect();
    json!({"totalGames": game_pks.len(), "dates": [{"date": "2024-05-20", "games": games}]})
}

#[async_trait]
impl StatsApi for FakeStatsApi {
    async fn fetch_schedule(&self, _date: NaiveDate) -> Result<Value, UpstreamError> {
        self.schedule_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_schedule.load(Ordering::SeqCst) {
            return Err(UpstreamError::new(ResourceKind::Schedule, Some(503), "down"));
        }
        Ok(self
            .schedule
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| schedule_payload(&[])))
    }

    async fn fetch_game_feed(&self, game_pk: &GamePk) -> Result<Value, UpstreamError> {
        self.feed_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_feeds.lock().unwrap().contains(game_pk.as_str()) {
            return Err(UpstreamError::new(ResourceKind::GameFeed, Some(500), "boom"));
        }
        Ok(self
            .feeds
            .lock()
            .unwrap()
            .get(game_pk.as_str())
            .cloned()
            .unwrap_or_else(|| json!({})))
    }

    async fn fetch_people_batch(&self, ids: &[PersonId]) -> Result<Value, UpstreamError> {
        self.people_calls.fetch_add(1, Ordering::SeqCst);
        self.batches.lock().unwrap().push(ids.to_vec());

        let failing = self.failing_people.lock().unwrap();
        if ids.iter().any(|id| failing.contains(&id.0)) {
            return Err(UpstreamError::new(ResourceKind::People, Some(502), "bad gateway"));
        }

        let countries = self.countries.lock().unwrap();
        let people: Vec<Value> = ids
            .iter()
            .map(|id| {
                let mut person = json!({"id": id.0, "fullName": format!("Player {}", id.0)});
                if let Some(country) = countries.get(&id.0) {
                    person["birthCountry"] = json!(country);
                }
                person
            })
            .collect();
        Ok(json!({"copyright": "test", "people": people}))
    }
}

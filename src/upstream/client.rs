//! reqwest-backed client for the MLB stats API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::StatsApi;
use crate::error::{ResourceKind, UpstreamError};
use crate::models::{join_ids, GamePk, PersonId};

/// Schedule endpoint with the team, venue, probable pitcher and linescore
/// hydrations the client renders.
pub fn schedule_url(base_url: &str, date: NaiveDate) -> String {
    format!(
        "{}/api/v1/schedule?sportId=1&date={}&hydrate=team,venue,probablePitcher,linescore",
        base_url,
        date.format("%Y-%m-%d")
    )
}

pub fn game_feed_url(base_url: &str, game_pk: &GamePk) -> String {
    format!("{}/api/v1.1/game/{}/feed/live", base_url, game_pk)
}

/// People endpoint hydrated with current team, draft year and the season
/// stats of `season`.
pub fn people_url(base_url: &str, ids: &[PersonId], season: i32) -> String {
    format!(
        "{}/api/v1/people?personIds={}&hydrate=currentTeam,stats(type=season,season={}),draftYear",
        base_url,
        join_ids(ids),
        season
    )
}

/// HTTP implementation of [`StatsApi`].
#[derive(Debug, Clone)]
pub struct HttpStatsApi {
    client: Client,
    base_url: String,
}

impl HttpStatsApi {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    ///
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a new HttpStatsApi with a custom HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, resource: ResourceKind, url: String) -> Result<Value, UpstreamError> {
        debug!(%resource, %url, "Requesting upstream");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::new(resource, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::new(
                resource,
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| UpstreamError::new(resource, None, format!("invalid JSON body: {e}")))
    }
}

#[async_trait]
impl StatsApi for HttpStatsApi {
    async fn fetch_schedule(&self, date: NaiveDate) -> Result<Value, UpstreamError> {
        self.get_json(ResourceKind::Schedule, schedule_url(&self.base_url, date))
            .await
    }

    async fn fetch_game_feed(&self, game_pk: &GamePk) -> Result<Value, UpstreamError> {
        self.get_json(ResourceKind::GameFeed, game_feed_url(&self.base_url, game_pk))
            .await
    }

    async fn fetch_people_batch(&self, ids: &[PersonId]) -> Result<Value, UpstreamError> {
        if ids.is_empty() {
            return Ok(json!({ "people": [] }));
        }
        // Season is read at call time so a long-running process rolls over.
        let season = Local::now().year();
        self.get_json(ResourceKind::People, people_url(&self.base_url, ids, season))
            .await
    }
}

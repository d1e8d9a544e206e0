//! Upstream Module
//!
//! Access to the third-party stats API. Callers depend on the [`StatsApi`]
//! trait; [`HttpStatsApi`] is the production implementation.

mod client;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use crate::error::UpstreamError;
use crate::models::{GamePk, PersonId};

pub use client::{game_feed_url, people_url, schedule_url, HttpStatsApi};

/// The three upstream resources the proxy fronts.
///
/// One call is one outbound request. Implementations never retry; a failure
/// is returned to the caller as soon as it happens.
#[async_trait]
pub trait StatsApi: Send + Sync {
    /// Schedule for one calendar date.
    async fn fetch_schedule(&self, date: NaiveDate) -> Result<Value, UpstreamError>;

    /// Live feed for one game.
    async fn fetch_game_feed(&self, game_pk: &GamePk) -> Result<Value, UpstreamError>;

    /// Biographical data for a batch of people. Callers keep batches within
    /// the configured batch size.
    async fn fetch_people_batch(&self, ids: &[PersonId]) -> Result<Value, UpstreamError>;
}

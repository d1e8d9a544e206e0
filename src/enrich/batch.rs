//! Batch Enrichment Engine
//!
//! Splits a person id list into bounded batches, resolves each batch
//! through the cache, and keeps whatever succeeded.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::MAX_PEOPLE_BATCH_SIZE;
use crate::error::UpstreamError;
use crate::models::{EnrichedPlayer, PersonId};
use crate::resolver::CachedResolver;

/// Drops repeated ids, keeping the first occurrence of each.
pub fn dedupe_preserving_order(ids: &[PersonId]) -> Vec<PersonId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Consecutive groups of at most `batch_size` ids.
pub fn partition(ids: &[PersonId], batch_size: usize) -> Vec<Vec<PersonId>> {
    ids.chunks(batch_size.max(1)).map(<[PersonId]>::to_vec).collect()
}

// == Batch Failure ==
/// A batch whose upstream call failed. Its members are missing from the
/// result.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub index: usize,
    pub ids: Vec<PersonId>,
    pub error: String,
}

// == Batch Report ==
/// Outcome of one enrichment run, with successful payloads in batch order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Deduplicated input, in first-seen order
    pub requested: Vec<PersonId>,
    pub batches: usize,
    pub cached_batches: usize,
    pub payloads: Vec<Value>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Players from every successful batch, ordered by their position in the
    /// requested list. Players upstream returned without being asked for sort
    /// last.
    pub fn players(&self) -> Vec<EnrichedPlayer> {
        let position: HashMap<PersonId, usize> = self
            .requested
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, i))
            .collect();

        let mut players: Vec<EnrichedPlayer> = self
            .payloads
            .iter()
            .flat_map(EnrichedPlayer::from_people_payload)
            .collect();
        players.sort_by_key(|p| position.get(&p.id).copied().unwrap_or(usize::MAX));
        players
    }

    /// Single people payload combining every successful batch.
    ///
    /// One batch is returned verbatim. Several are merged onto the first
    /// payload's envelope with their `people` arrays concatenated.
    pub fn merged_payload(&self) -> Value {
        if let [single] = self.payloads.as_slice() {
            return single.clone();
        }

        let mut envelope = self
            .payloads
            .first()
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_else(Map::new);

        let people: Vec<Value> = self
            .payloads
            .iter()
            .filter_map(|p| p.get("people").and_then(Value::as_array))
            .flatten()
            .cloned()
            .collect();
        envelope.insert("people".to_string(), Value::Array(people));
        Value::Object(envelope)
    }
}

// == Batch Enricher ==
#[derive(Clone)]
pub struct BatchEnricher {
    resolver: CachedResolver,
    batch_size: usize,
}

impl BatchEnricher {
    /// `batch_size` is clamped to `1..=MAX_PEOPLE_BATCH_SIZE`.
    pub fn new(resolver: CachedResolver, batch_size: usize) -> Self {
        Self {
            resolver,
            batch_size: batch_size.clamp(1, MAX_PEOPLE_BATCH_SIZE),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn resolver(&self) -> &CachedResolver {
        &self.resolver
    }

    /// Resolves every batch of `ids` concurrently.
    ///
    /// Failed batches are logged and recorded in the report. An error is
    /// returned only when there was at least one batch and all of them failed.
    pub async fn fetch_batches(&self, ids: &[PersonId]) -> Result<BatchReport, UpstreamError> {
        let requested = dedupe_preserving_order(ids);
        if requested.is_empty() {
            return Ok(BatchReport::default());
        }

        let batches = partition(&requested, self.batch_size);
        debug!(
            people = requested.len(),
            batches = batches.len(),
            "Resolving people batches"
        );

        // join_all yields results in submission order, whatever order the
        // responses arrive in.
        let results = join_all(batches.iter().map(|batch| self.resolver.people_batch(batch))).await;

        let mut report = BatchReport {
            batches: batches.len(),
            ..BatchReport::default()
        };
        let mut last_error = None;

        for (index, (batch, result)) in batches.into_iter().zip(results).enumerate() {
            match result {
                Ok(resolved) => {
                    if resolved.from_cache {
                        report.cached_batches += 1;
                    }
                    report.payloads.push(resolved.value);
                }
                Err(err) => {
                    warn!(
                        batch = index,
                        size = batch.len(),
                        error = %err,
                        "People batch failed, its players are omitted"
                    );
                    report.failures.push(BatchFailure {
                        index,
                        ids: batch,
                        error: err.to_string(),
                    });
                    last_error = Some(err);
                }
            }
        }

        if report.payloads.is_empty() {
            if let Some(err) = last_error {
                return Err(err);
            }
        }

        report.requested = requested;
        Ok(report)
    }

    /// Enriched players for `ids`; see [`BatchEnricher::fetch_batches`] for
    /// the failure policy.
    pub async fn enrich_people(&self, ids: &[PersonId]) -> Result<Vec<EnrichedPlayer>, UpstreamError> {
        Ok(self.fetch_batches(ids).await?.players())
    }
}

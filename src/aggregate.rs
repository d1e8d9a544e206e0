//! Per-Game Aggregation
//!
//! For every game of a schedule: resolve the live feed, enrich the roster it
//! lists, and summarise nationalities. Games run concurrently and fail
//! independently; a failed game is reported, never fatal to the others.

use std::collections::{BTreeMap, HashMap};

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::enrich::{nationality, BatchEnricher};
use crate::error::UpstreamError;
use crate::models::mlb::{feed_game_state, feed_linescore, feed_roster_ids};
use crate::models::{EnrichedPlayer, Game, GamePk, GameStatus, PersonId, ScheduleGames};

// == Report Types ==
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    #[serde(flatten)]
    pub player: EnrichedPlayer,
    /// `None` when the birth country is missing or not in the table
    pub nationality: Option<&'static str>,
    pub matches_filter: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityCount {
    pub code: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub players: Vec<PlayerView>,
    pub linescore: Option<Value>,
    pub game_state: Option<GameStatus>,
    /// Mapped nationalities, most represented first
    pub nationalities: Vec<NationalityCount>,
    /// Players whose birth country is not in the nationality table
    pub unmapped_players: usize,
    pub players_without_country: usize,
    /// Ids of players matching the nationality filter, when one was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_matches: Option<Vec<PersonId>>,
    pub failed_batches: usize,
    pub feed_from_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFailure {
    pub game_pk: GamePk,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub nationality_filter: Option<String>,
    pub games: BTreeMap<GamePk, GameReport>,
    pub failed: Vec<GameFailure>,
}

// == Summaries ==
/// Classifies `players` and tallies their nationalities.
fn summarise(
    players: Vec<EnrichedPlayer>,
    filter: Option<&str>,
) -> (Vec<PlayerView>, Vec<NationalityCount>, usize, usize) {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    let mut unmapped = 0;
    let mut without_country = 0;

    let views: Vec<PlayerView> = players
        .into_iter()
        .map(|player| {
            let code = match player.birth_country.as_deref() {
                Some(country) => {
                    let code = nationality::nationality_code(country);
                    if code.is_none() {
                        debug!(player = %player.id, country, "Unmapped birth country");
                        unmapped += 1;
                    }
                    code
                }
                None => {
                    without_country += 1;
                    None
                }
            };
            if let Some(code) = code {
                *counts.entry(code).or_default() += 1;
            }

            PlayerView {
                matches_filter: matches!((code, filter), (Some(c), Some(f)) if c == f),
                nationality: code,
                player,
            }
        })
        .collect();

    let mut nationalities: Vec<NationalityCount> = counts
        .into_iter()
        .map(|(code, count)| NationalityCount { code, count })
        .collect();
    nationalities.sort_by(|a, b| b.count.cmp(&a.count).then(a.code.cmp(b.code)));

    (views, nationalities, unmapped, without_country)
}

// == Game Aggregator ==
#[derive(Clone)]
pub struct GameAggregator {
    enricher: BatchEnricher,
}

impl GameAggregator {
    pub fn new(enricher: BatchEnricher) -> Self {
        Self { enricher }
    }

    /// Aggregates the readable games of a schedule and reports the rest.
    ///
    /// Unreadable entries with a usable `gamePk` are listed under `failed`;
    /// entries without one are dropped (already logged while parsing).
    pub async fn aggregate_schedule(
        &self,
        schedule: &ScheduleGames,
        filter: Option<&str>,
    ) -> AggregateReport {
        let mut report = self.aggregate(&schedule.games, filter).await;
        report.failed.extend(schedule.rejected.iter().filter_map(|rejected| {
            rejected.game_pk.clone().map(|game_pk| GameFailure {
                game_pk,
                error: format!("unreadable schedule entry: {}", rejected.error),
            })
        }));
        report
    }

    /// Enriches every game concurrently and waits for all of them to settle.
    ///
    /// `filter` is a nationality code; players are flagged when their mapped
    /// code equals it.
    pub async fn aggregate(&self, games: &[Game], filter: Option<&str>) -> AggregateReport {
        let outcomes = join_all(
            games
                .iter()
                .map(|game| async move { (game, self.enrich_game(game, filter).await) }),
        )
        .await;

        let mut report = AggregateReport {
            nationality_filter: filter.map(str::to_string),
            ..AggregateReport::default()
        };

        for (game, outcome) in outcomes {
            match outcome {
                Ok(game_report) => {
                    report.games.insert(game.game_pk.clone(), game_report);
                }
                Err(err) => {
                    warn!(game_pk = %game.game_pk, error = %err, "Game enrichment failed");
                    report.failed.push(GameFailure {
                        game_pk: game.game_pk.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(
            games = games.len(),
            enriched = report.games.len(),
            failed = report.failed.len(),
            "Aggregation complete"
        );
        report
    }

    /// Feed first, then the roster it names.
    async fn enrich_game(
        &self,
        game: &Game,
        filter: Option<&str>,
    ) -> Result<GameReport, UpstreamError> {
        let feed = self.enricher.resolver().game_feed(&game.game_pk).await?;

        let roster = feed_roster_ids(&feed.value);
        if roster.is_empty() {
            warn!(game_pk = %game.game_pk, "No player ids in boxscore");
        }

        let batches = self.enricher.fetch_batches(&roster).await?;
        let (players, nationalities, unmapped_players, players_without_country) =
            summarise(batches.players(), filter);

        let filter_matches = filter.map(|_| {
            players
                .iter()
                .filter(|p| p.matches_filter)
                .map(|p| p.player.id)
                .collect()
        });

        Ok(GameReport {
            linescore: feed_linescore(&feed.value).or_else(|| game.linescore.clone()),
            game_state: feed_game_state(&feed.value).or_else(|| game.status.clone()),
            players,
            nationalities,
            unmapped_players,
            players_without_country,
            filter_matches,
            failed_batches: batches.failures.len(),
            feed_from_cache: feed.from_cache,
        })
    }
}

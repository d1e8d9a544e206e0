//! Typed views over stats API payloads.
//!
//! Upstream JSON is cached and proxied verbatim; these views are parsed from
//! it only where the pipeline needs to read fields. Every field the API may
//! omit is an `Option`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::ids::{GamePk, PersonId};

// == Schedule ==
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleDate {
    #[serde(default)]
    pub date: Option<String>,
    /// Raw game entries; each is parsed on its own by [`Schedule::into_games`].
    #[serde(default)]
    pub games: Vec<Value>,
}

/// A schedule entry that could not be read as a [`Game`].
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedGame {
    /// The entry's own `gamePk`, when it carries a usable one
    pub game_pk: Option<GamePk>,
    pub error: String,
}

/// Games of a schedule, split into the ones that parsed and the ones that did not.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGames {
    pub games: Vec<Game>,
    pub rejected: Vec<RejectedGame>,
}

impl ScheduleGames {
    /// Every entry the schedule listed, parsed or not.
    pub fn total(&self) -> usize {
        self.games.len() + self.rejected.len()
    }
}

impl Schedule {
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Schedule::deserialize(value)
    }

    /// All games across every date of the response, in upstream order.
    ///
    /// A malformed entry is set aside in `rejected`; its siblings still parse.
    pub fn into_games(self) -> ScheduleGames {
        let mut parsed = ScheduleGames::default();
        for raw in self.dates.into_iter().flat_map(|d| d.games) {
            match Game::deserialize(&raw) {
                Ok(game) => parsed.games.push(game),
                Err(err) => {
                    let game_pk = raw_game_pk(&raw);
                    warn!(game_pk = ?game_pk, error = %err, "Unreadable schedule entry");
                    parsed.rejected.push(RejectedGame {
                        game_pk,
                        error: err.to_string(),
                    });
                }
            }
        }
        parsed
    }
}

fn raw_game_pk(raw: &Value) -> Option<GamePk> {
    match raw.get("gamePk")? {
        Value::Number(n) => n.as_u64().map(GamePk::from),
        Value::String(s) => GamePk::parse(s),
        _ => None,
    }
}

// == Game ==
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_pk: GamePk,
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub status: Option<GameStatus>,
    #[serde(default)]
    pub teams: Option<GameTeams>,
    #[serde(default)]
    pub venue: Option<NamedRef>,
    #[serde(default)]
    pub linescore: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub abstract_game_state: Option<String>,
    #[serde(default)]
    pub detailed_state: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameTeams {
    #[serde(default)]
    pub away: Option<TeamSide>,
    #[serde(default)]
    pub home: Option<TeamSide>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSide {
    #[serde(default)]
    pub team: Option<NamedRef>,
    #[serde(default)]
    pub probable_pitcher: Option<PersonRef>,
    #[serde(default)]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NamedRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    /// Placeholder pitchers ("TBD") come without an id.
    #[serde(default)]
    pub id: Option<PersonId>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl Game {
    fn side(&self, home: bool) -> Option<&TeamSide> {
        let teams = self.teams.as_ref()?;
        if home {
            teams.home.as_ref()
        } else {
            teams.away.as_ref()
        }
    }

    pub fn home_team_name(&self) -> Option<&str> {
        self.side(true)?.team.as_ref()?.name.as_deref()
    }

    pub fn away_team_name(&self) -> Option<&str> {
        self.side(false)?.team.as_ref()?.name.as_deref()
    }

    pub fn venue_name(&self) -> Option<&str> {
        self.venue.as_ref()?.name.as_deref()
    }

    pub fn detailed_state(&self) -> Option<&str> {
        self.status.as_ref()?.detailed_state.as_deref()
    }

    /// Away then home probable pitcher, whichever are announced.
    pub fn probable_pitcher_ids(&self) -> Vec<PersonId> {
        [false, true]
            .into_iter()
            .filter_map(|home| self.side(home)?.probable_pitcher.as_ref()?.id)
            .collect()
    }
}

// == Live Feed ==
/// Roster ids from a live feed's boxscore, away team first.
///
/// Boxscore player maps are keyed `"ID<digits>"`; keys that do not reduce to
/// a numeric id are skipped.
pub fn feed_roster_ids(feed: &Value) -> Vec<PersonId> {
    ["away", "home"]
        .into_iter()
        .filter_map(|side| {
            feed.pointer(&format!("/liveData/boxscore/teams/{side}/players"))
                .and_then(Value::as_object)
        })
        .flat_map(|players| players.keys())
        .filter_map(|key| PersonId::parse(key))
        .collect()
}

pub fn feed_linescore(feed: &Value) -> Option<Value> {
    feed.pointer("/liveData/linescore").cloned()
}

/// The feed's game status block, e.g. `{"abstractGameState": "Live", ...}`.
pub fn feed_game_state(feed: &Value) -> Option<GameStatus> {
    feed.pointer("/gameData/status")
        .and_then(|status| GameStatus::deserialize(status).ok())
}

// == People ==
/// A person from a people response, reduced to what the aggregation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlayer {
    pub id: PersonId,
    pub full_name: String,
    pub birth_country: Option<String>,
    pub primary_position: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPerson {
    id: PersonId,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    birth_country: Option<String>,
    #[serde(default)]
    primary_position: Option<RawPosition>,
}

#[derive(Deserialize)]
struct RawPosition {
    #[serde(default)]
    abbreviation: Option<String>,
}

impl EnrichedPlayer {
    /// Extracts players from a people payload, skipping malformed entries.
    pub fn from_people_payload(payload: &Value) -> Vec<Self> {
        payload
            .get("people")
            .and_then(Value::as_array)
            .map(|people| {
                people
                    .iter()
                    .filter_map(|person| RawPerson::deserialize(person).ok())
                    .map(|raw| EnrichedPlayer {
                        id: raw.id,
                        full_name: raw.full_name.unwrap_or_default(),
                        birth_country: raw.birth_country,
                        primary_position: raw.primary_position.and_then(|p| p.abbreviation),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

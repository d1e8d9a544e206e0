//! Cache key construction for the three upstream resource kinds.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use crate::error::ResourceKind;
use crate::models::{GamePk, PersonId};

/// `schedule-<YYYY-MM-DD>`
pub fn schedule_key(date: &NaiveDate) -> String {
    format!("{}-{}", ResourceKind::Schedule, date.format("%Y-%m-%d"))
}

/// `gamefeed-<gamePk>`
pub fn gamefeed_key(game_pk: &GamePk) -> String {
    format!("{}-{}", ResourceKind::GameFeed, game_pk)
}

/// `people-<digest>` over the sorted, deduplicated id set.
///
/// The whole set is hashed so two batches only share an entry when they
/// hold exactly the same people, in any order.
pub fn people_key(ids: &[PersonId]) -> String {
    let mut sorted: Vec<u64> = ids.iter().map(|id| id.0).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut hasher = Sha256::new();
    for (i, id) in sorted.iter().enumerate() {
        if i > 0 {
            hasher.update(b",");
        }
        hasher.update(id.to_string().as_bytes());
    }
    let hash = hex::encode(&hasher.finalize()[..16]);
    format!("{}-{}", ResourceKind::People, hash)
}

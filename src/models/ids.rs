//! Identifier newtypes for games and people.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// == Person Id ==
/// Numeric MLB person identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u64);

impl PersonId {
    /// Parses an identifier, stripping any non-digit prefix.
    ///
    /// Boxscore rosters key players as `"ID660271"`; query strings carry bare
    /// digits. Anything with trailing non-digits or no digits is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.trim().trim_start_matches(|c: char| !c.is_ascii_digit());
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(PersonId)
    }

    /// Parses a comma-separated list, failing on the first bad element.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self::parse(s).ok_or_else(|| format!("Invalid person id: '{s}'")))
            .collect()
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Joins ids into the comma-separated form the people endpoint expects.
pub fn join_ids(ids: &[PersonId]) -> String {
    ids.iter()
        .map(PersonId::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// == Game Pk ==
/// Upstream game identifier.
///
/// The schedule reports it as an integer, the path parameter arrives as text;
/// both normalise to the same string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GamePk(String);

impl GamePk {
    /// Accepts non-empty ASCII alphanumeric identifiers only, since the value
    /// is spliced into an upstream URL path.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for GamePk {
    fn from(pk: u64) -> Self {
        Self(pk.to_string())
    }
}

impl fmt::Display for GamePk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GamePk {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(pk) => Ok(GamePk::from(pk)),
            Raw::Str(s) => GamePk::parse(&s)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid gamePk '{s}'"))),
        }
    }
}

//! Query-string DTOs for the proxy API
//!
//! Required parameters are modelled as `Option` so that a missing value
//! surfaces as our own 400 JSON error instead of axum's plain-text rejection.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::enrich::nationality;
use crate::models::PersonId;

/// Query for `GET /api/schedule` and the date part of `GET /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleParams {
    #[serde(default)]
    pub date: Option<String>,
}

impl ScheduleParams {
    /// Returns the requested date, or the error message to report.
    pub fn validate(&self) -> Result<NaiveDate, String> {
        parse_date(self.date.as_deref())
    }
}

/// Query for `GET /api/people`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleParams {
    #[serde(default, rename = "personIds")]
    pub person_ids: Option<String>,
}

impl PeopleParams {
    pub fn validate(&self) -> Result<Vec<PersonId>, String> {
        let raw = self
            .person_ids
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "The personIds parameter is required".to_string())?;

        let ids = PersonId::parse_list(raw)?;
        if ids.is_empty() {
            return Err("The personIds parameter is required".to_string());
        }
        Ok(ids)
    }
}

/// Query for `GET /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesParams {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl GamesParams {
    /// Returns the date and the upper-cased nationality filter, if any.
    pub fn validate(&self) -> Result<(NaiveDate, Option<String>), String> {
        let date = parse_date(self.date.as_deref())?;

        let filter = match self.nationality.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(code) => {
                let code = code.to_ascii_uppercase();
                if !nationality::is_known_code(&code) {
                    return Err(format!("Unknown nationality code: '{code}'"));
                }
                Some(code)
            }
        };

        Ok((date, filter))
    }
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, String> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "The date parameter is required".to_string())?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{raw}', expected YYYY-MM-DD"))
}

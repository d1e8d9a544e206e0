//! Error types for the proxy server
//!
//! Provides unified error handling using thiserror.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Resource Kind ==
/// The three cacheable upstream query shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Schedule,
    GameFeed,
    People,
}

impl ResourceKind {
    /// Cache key prefix for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Schedule => "schedule",
            ResourceKind::GameFeed => "gamefeed",
            ResourceKind::People => "people",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Upstream Error ==
/// Failure of a single call to the stats API.
///
/// `status` is `None` when no HTTP response was received (connect error,
/// timeout, undecodable body).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{resource} request failed{}: {message}", status_suffix(.status))]
pub struct UpstreamError {
    pub resource: ResourceKind,
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamError {
    pub fn new(resource: ResourceKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            resource,
            status,
            message: message.into(),
        }
    }

    /// Message safe to hand to clients; details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self.resource {
            ResourceKind::Schedule => "Could not fetch schedule data from the MLB API",
            ResourceKind::GameFeed => "Could not fetch game details from the MLB API",
            ResourceKind::People => "Could not fetch player details from the MLB API",
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|code| format!(" with status {code}"))
        .unwrap_or_default()
}

// == App Error Enum ==
/// Unified error type for the proxy server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed request parameter
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Third-party API failure
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upstream(err) => {
                tracing::error!(resource = %err.resource, status = ?err.status, "{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    err.public_message().to_string(),
                )
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy server.
pub type Result<T> = std::result::Result<T, AppError>;

//! Protocol module - JSON contract of the leaderboard collaborator
//!
//! `POST` body: `{"name": string, "score": number}`.
//! `POST` replies: 201 `{"success": true}`, 400 `{"error": ...}` for an
//! invalid payload, 500 `{"error": ...}` when the store fails.
//! `GET` reply: 200 with an array of `{"_id", "name", "score"}`, best first.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::types::ScoreReport;

/// Score submission sent by a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: f64,
}

impl From<&ScoreReport> for ScoreSubmission {
    fn from(report: &ScoreReport) -> Self {
        Self {
            name: report.player.clone(),
            score: f64::from(report.score),
        }
    }
}

/// Stored leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id", alias = "id")]
    pub id: u64,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("body is not valid JSON: {0}")]
    Json(String),
    #[error("name must be a non-empty string")]
    InvalidName,
    #[error("score must be a number")]
    InvalidScore,
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn created() -> Self {
        Self {
            status: 201,
            body: json!({ "success": true }),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::error(500, message)
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Validate a raw `POST` body.
///
/// The name must be a non-empty string and the score any JSON number.
pub fn parse_submission(body: &str) -> Result<ScoreSubmission, ProtocolError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ProtocolError::Json(e.to_string()))?;

    let name = match value.get("name") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(ProtocolError::InvalidName),
    };
    let score = value
        .get("score")
        .and_then(Value::as_f64)
        .ok_or(ProtocolError::InvalidScore)?;

    Ok(ScoreSubmission { name, score })
}

/// Decode a `GET` reply. Anything that is not an array decodes to an empty
/// list and rows that do not fit the entry shape are skipped.
pub fn parse_entries(body: &str) -> Vec<LeaderboardEntry> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

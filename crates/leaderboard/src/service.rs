//! Request handlers for the leaderboard collaborator
//!
//! Both handlers are total: every outcome, store failures included, becomes a
//! [`Response`] with a status code.

use std::sync::Arc;

use log::{info, warn};
use serde_json::Value;

use crate::protocol::{parse_submission, Response};
use crate::store::LeaderboardStore;
use crate::types::LEADERBOARD_LIMIT;

/// `POST` a score submission.
pub fn handle_post(store: &dyn LeaderboardStore, body: &str) -> Response {
    let submission = match parse_submission(body) {
        Ok(submission) => submission,
        Err(err) => {
            warn!("rejected score submission: {err}");
            return Response::bad_request(err.to_string());
        }
    };

    match store.insert(&submission.name, submission.score) {
        Ok(entry) => {
            info!("stored score {} for {} (id {})", entry.score, entry.name, entry.id);
            Response::created()
        }
        Err(err) => {
            warn!("could not store score: {err}");
            Response::server_error("failed to save score")
        }
    }
}

/// `GET` the top entries, best first.
pub fn handle_get(store: &dyn LeaderboardStore) -> Response {
    match store.top(LEADERBOARD_LIMIT) {
        Ok(entries) => match serde_json::to_value(entries) {
            Ok(body) => Response::ok(body),
            Err(err) => {
                warn!("could not encode leaderboard: {err}");
                Response::server_error("failed to load leaderboard")
            }
        },
        Err(err) => {
            warn!("could not read leaderboard: {err}");
            Response::server_error("failed to load leaderboard")
        }
    }
}

/// `POST` from async code without blocking the executor on store I/O.
pub async fn submit(store: Arc<dyn LeaderboardStore>, body: String) -> Response {
    match tokio::task::spawn_blocking(move || handle_post(store.as_ref(), &body)).await {
        Ok(response) => response,
        Err(err) => Response::server_error(format!("submission task failed: {err}")),
    }
}

/// `GET` from async code without blocking the executor on store I/O.
pub async fn query(store: Arc<dyn LeaderboardStore>) -> Response {
    match tokio::task::spawn_blocking(move || handle_get(store.as_ref())).await {
        Ok(response) => response,
        Err(err) => Response::server_error(format!("query task failed: {err}")),
    }
}

/// Body of a `GET` reply as a JSON string.
pub fn body_text(response: &Response) -> String {
    match &response.body {
        Value::Null => String::new(),
        body => body.to_string(),
    }
}

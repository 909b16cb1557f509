//! HTTP client for the match history API.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::json;
use tictac_engine::Outcome;
use tracing::{debug, info, instrument};

use crate::api::{BATCH_DELETE_PATH, ErrorBody, GAMES_PATH};
use crate::db::MatchRecord;

/// Default server address used by the command-line front-ends.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Typed client for `/api/games`.
#[derive(Debug, Clone)]
pub struct HistoryClient {
    base_url: String,
    client: reqwest::Client,
}

impl HistoryClient {
    /// Creates a client for the server at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url))]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the most recent records, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MatchRecord>> {
        let response = self
            .client
            .get(self.url(GAMES_PATH))
            .send()
            .await
            .context("Failed to reach history server")?;
        let records: Vec<MatchRecord> = check(response).await?.json().await?;
        debug!(count = records.len(), "Got match history");
        Ok(records)
    }

    /// Posts a finished game.
    #[instrument(skip(self), fields(outcome = %outcome))]
    pub async fn record(&self, outcome: Outcome) -> Result<MatchRecord> {
        let response = self
            .client
            .post(self.url(GAMES_PATH))
            .json(&json!({ "winner": outcome }))
            .send()
            .await
            .context("Failed to reach history server")?;
        let record: MatchRecord = check(response).await?.json().await?;
        info!(id = record.id(), "Match saved");
        Ok(record)
    }

    /// Deletes one record. Succeeds whether or not it existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("{}/{}", GAMES_PATH, id)))
            .send()
            .await
            .context("Failed to reach history server")?;
        check(response).await?;
        Ok(())
    }

    /// Deletes several records in one request.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn delete_many(&self, ids: &[i32]) -> Result<()> {
        let response = self
            .client
            .post(self.url(BATCH_DELETE_PATH))
            .json(&json!({ "ids": ids }))
            .send()
            .await
            .context("Failed to reach history server")?;
        check(response).await?;
        Ok(())
    }
}

/// Turns non-success statuses into errors, using the server's message when present.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(status = %status, body = %body, "Request failed");
    anyhow::bail!(failure_message(status, &body))
}

/// Describes a failed response from its status and raw body.
fn failure_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message,
            field: Some(field),
        }) => format!("{} ({}): {}", status, field, message),
        Ok(ErrorBody { message, .. }) => format!("{}: {}", status, message),
        Err(_) => format!("{}: {}", status, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_names_field() {
        let body = r#"{"message":"Invalid IDs","field":"ids"}"#;
        assert_eq!(
            failure_message(StatusCode::BAD_REQUEST, body),
            "400 Bad Request (ids): Invalid IDs"
        );
    }

    #[test]
    fn test_failure_message_without_field() {
        let body = r#"{"message":"Internal server error"}"#;
        assert_eq!(
            failure_message(StatusCode::INTERNAL_SERVER_ERROR, body),
            "500 Internal Server Error: Internal server error"
        );
    }

    #[test]
    fn test_failure_message_falls_back_to_raw_body() {
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "502 Bad Gateway: upstream down"
        );
        assert_eq!(failure_message(StatusCode::NOT_FOUND, ""), "404 Not Found: ");
    }
}

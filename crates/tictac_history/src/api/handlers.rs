//! Request handlers. Each validates input shape, then delegates to
//! [`HistoryService`] on a blocking thread.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::api::ApiError;
use crate::db::MatchRecord;
use crate::error::{HistoryError, ValidationError};
use crate::service::HistoryService;

const WINNER_REQUIRED: &str = "winner must be one of \"X\", \"O\" or \"draw\"";
const INVALID_ID: &str = "Invalid ID";
const INVALID_IDS: &str = "Invalid IDs";

/// Runs a storage operation off the async runtime.
async fn blocking<T, F>(service: HistoryService, op: F) -> Result<T, ApiError>
where
    F: FnOnce(&HistoryService) -> Result<T, HistoryError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || op(&service)).await?;
    Ok(result?)
}

fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, ValidationError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ValidationError::new(rejection.body_text()))
}

/// Parses a path id. Any decimal integer is accepted; `None` means it lies
/// outside the stored id range and can match no record.
fn parse_id(raw: &str) -> Result<Option<i32>, ValidationError> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::for_field(INVALID_ID, "id"));
    }
    Ok(raw.parse().ok())
}

/// Reads `ids` as a list of record ids.
///
/// Every member must be an integer. Integers outside the stored id range
/// are dropped since no record can carry them.
fn parse_ids(body: &Value) -> Result<Vec<i32>, ValidationError> {
    let invalid = || ValidationError::for_field(INVALID_IDS, "ids");
    let raw = body.get("ids").and_then(Value::as_array).ok_or_else(invalid)?;
    let mut ids = Vec::with_capacity(raw.len());
    for id in raw {
        match id {
            Value::Number(n) if n.is_i64() || n.is_u64() => {
                if let Some(id) = n.as_i64().and_then(|n| i32::try_from(n).ok()) {
                    ids.push(id);
                }
            }
            _ => return Err(invalid()),
        }
    }
    Ok(ids)
}

/// `GET /api/games`
#[instrument(skip_all)]
pub async fn list_games(
    State(service): State<HistoryService>,
) -> Result<Json<Vec<MatchRecord>>, ApiError> {
    let records = blocking(service, |service| service.list()).await?;
    Ok(Json(records))
}

/// `POST /api/games` with `{"winner": "X" | "O" | "draw"}`
#[instrument(skip_all)]
pub async fn create_game(
    State(service): State<HistoryService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MatchRecord>), ApiError> {
    let body = json_body(payload)?;
    let winner = body
        .get("winner")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ValidationError::for_field(WINNER_REQUIRED, "winner"))?;
    let record = blocking(service, move |service| service.create(&winner)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `DELETE /api/games/{id}`
#[instrument(skip(service))]
pub async fn delete_game(
    State(service): State<HistoryService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let Some(id) = parse_id(&id)? else {
        debug!(id = %id, "Id outside stored range, nothing to delete");
        return Ok(StatusCode::NO_CONTENT);
    };
    blocking(service, move |service| service.delete_one(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/games/batch-delete` with `{"ids": [1, 2, 3]}`
#[instrument(skip_all)]
pub async fn batch_delete_games(
    State(service): State<HistoryService>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let ids = parse_ids(&json_body(payload)?)?;
    blocking(service, move |service| service.delete_many(&ids)).await?;
    Ok(StatusCode::NO_CONTENT)
}

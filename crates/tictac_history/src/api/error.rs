//! Mapping of history failures onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{HistoryError, ValidationError};

/// JSON error body: `{"message": ..., "field": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable explanation.
    pub message: String,
    /// Offending request field, when one applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorBody {
    fn internal() -> Self {
        Self {
            message: "Internal server error".to_string(),
            field: None,
        }
    }
}

impl From<&ValidationError> for ErrorBody {
    fn from(err: &ValidationError) -> Self {
        Self {
            message: err.message.clone(),
            field: err.field.clone(),
        }
    }
}

/// Failure of a request handler.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// The history operation failed or its input was rejected.
    #[display("{}", _0)]
    History(HistoryError),
    /// The blocking storage task panicked or was cancelled.
    #[display("Storage task failed: {}", _0)]
    Task(tokio::task::JoinError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::History(HistoryError::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::History(HistoryError::Validation(err)) => {
                warn!(message = %err.message, field = ?err.field, "Request rejected");
                (StatusCode::BAD_REQUEST, Json(ErrorBody::from(&err))).into_response()
            }
            other => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::internal())).into_response()
            }
        }
    }
}

//! Error types shared by the history service and its HTTP surface.

use derive_more::{Display, Error, From};
use tracing::instrument;

use crate::db::DbError;

/// Malformed or out-of-domain input, reported to callers as a 400.
#[derive(Debug, Clone, Display, Error)]
#[display("Validation error: {} at {}:{}", message, file, line)]
pub struct ValidationError {
    /// Human-readable explanation, returned to the client.
    pub message: String,
    /// Offending request field, when one applies.
    pub field: Option<String>,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ValidationError {
    /// Creates a validation error that is not tied to a field.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            field: None,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates a validation error for the request field `field`.
    #[track_caller]
    #[instrument(skip(message, field))]
    pub fn for_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            field: Some(field.into()),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Failure of a history operation.
#[derive(Debug, Clone, Display, Error, From)]
pub enum HistoryError {
    /// Input rejected before reaching storage.
    #[display("{}", _0)]
    Validation(ValidationError),
    /// Storage failed; no write was applied.
    #[display("{}", _0)]
    Storage(DbError),
}

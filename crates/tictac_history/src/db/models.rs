//! Database models for match records.

use chrono::{NaiveDateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tictac_engine::Outcome;
use tracing::instrument;

use crate::db::{DbError, DbErrorKind, schema};

/// Persisted outcome of one finished game.
///
/// Serialized with camelCase keys: `{"id", "winner", "createdAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Getters, Serialize, Deserialize)]
#[diesel(table_name = schema::match_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    id: i32,
    winner: String,
    created_at: NaiveDateTime,
}

impl MatchRecord {
    /// Parses the stored winner literal into an [`Outcome`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the row holds a value other than `X`, `O` or `draw`.
    #[instrument(skip(self), fields(id = self.id, winner = %self.winner))]
    pub fn outcome(&self) -> Result<Outcome, DbError> {
        self.winner.parse().map_err(|e| {
            DbError::new(
                DbErrorKind::InvalidData,
                format!("Record {}: {}", self.id, e),
            )
        })
    }
}

/// Insertable match record.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::match_records)]
pub struct NewMatchRecord {
    winner: String,
    created_at: NaiveDateTime,
}

impl NewMatchRecord {
    /// Builds a record for `outcome`, stamped with the current UTC time.
    #[instrument]
    pub fn from_outcome(outcome: Outcome) -> Self {
        Self::new(outcome.as_str().to_string(), Utc::now().naive_utc())
    }
}

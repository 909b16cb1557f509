//! History business logic between raw input and the repository.

use tictac_engine::{Outcome, ParseOutcomeError};
use tracing::{debug, info, instrument, warn};

use crate::db::{MatchRecord, MatchRepository};
use crate::error::{HistoryError, ValidationError};

/// Service layer for match history.
///
/// Wraps [`MatchRepository`] with input validation so callers can pass
/// request literals straight through.
#[derive(Debug, Clone)]
pub struct HistoryService {
    repository: MatchRepository,
}

impl HistoryService {
    /// Creates a history service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: MatchRepository) -> Self {
        info!(path = %repository.db_path(), "Creating HistoryService");
        Self { repository }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &MatchRepository {
        &self.repository
    }

    /// Records a finished game from its winner literal (`X`, `O` or `draw`).
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Validation`] for any other literal, or
    /// [`HistoryError::Storage`] if the insert fails.
    #[instrument(skip(self))]
    pub fn create(&self, winner: &str) -> Result<MatchRecord, HistoryError> {
        let outcome: Outcome = winner.parse().map_err(|e: ParseOutcomeError| {
            warn!(winner, "Rejected winner literal");
            ValidationError::for_field(e.to_string(), "winner")
        })?;
        self.record(outcome)
    }

    /// Records a finished game from a typed outcome.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the insert fails.
    #[instrument(skip(self), fields(outcome = %outcome))]
    pub fn record(&self, outcome: Outcome) -> Result<MatchRecord, HistoryError> {
        Ok(self.repository.create(outcome)?)
    }

    /// Returns the most recent records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the query fails.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<MatchRecord>, HistoryError> {
        debug!("Listing recent matches");
        Ok(self.repository.list_recent()?)
    }

    /// Deletes one record; a missing id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the delete fails.
    #[instrument(skip(self))]
    pub fn delete_one(&self, id: i32) -> Result<(), HistoryError> {
        let deleted = self.repository.delete_one(id)?;
        if deleted == 0 {
            debug!(id, "No record with this id");
        }
        Ok(())
    }

    /// Deletes all records in `ids`; unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if the delete fails.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub fn delete_many(&self, ids: &[i32]) -> Result<(), HistoryError> {
        let deleted = self.repository.delete_many(ids)?;
        debug!(deleted, "Batch delete finished");
        Ok(())
    }

    /// Prepares storage for serving: applies migrations and seeds an empty store.
    ///
    /// Returns the records inserted by the seed.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Storage`] if migrations or the seed fail.
    #[instrument(skip(self))]
    pub fn bootstrap(&self) -> Result<Vec<MatchRecord>, HistoryError> {
        self.repository.run_migrations()?;
        Ok(self.repository.seed_if_empty()?)
    }
}

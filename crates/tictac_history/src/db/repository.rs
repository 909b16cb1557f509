//! SQLite repository for match records.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tictac_engine::Outcome;
use tracing::{debug, info, instrument};

use crate::db::{DbError, DbErrorKind, MatchRecord, NewMatchRecord, schema::match_records};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Maximum number of records returned by [`MatchRepository::list_recent`].
pub const RECENT_LIMIT: i64 = 10;

/// Records inserted, in this order, into an empty store on startup.
pub const SEED_OUTCOMES: [Outcome; 3] = Outcome::ALL;

/// Lock wait before a concurrent writer gives up with `SQLITE_BUSY`.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Ids per `DELETE ... IN (...)` statement, below SQLite's bind limit.
const DELETE_CHUNK: usize = 500;

/// Repository for finished-game records.
///
/// Every operation opens its own connection, so clones can be moved onto
/// blocking threads freely. Each create and delete is atomic.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    db_path: String,
}

impl MatchRepository {
    /// Creates a repository for the SQLite database at `db_path`.
    ///
    /// The file is created on first connection if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(
                DbErrorKind::Connection,
                "Database path must not be empty",
            ));
        }
        info!(path = %db_path, "Creating MatchRepository");
        Ok(Self { db_path })
    }

    /// Path of the backing database.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;
        conn.batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(|e| DbError::new(DbErrorKind::Connection, e.to_string()))?;
        Ok(conn)
    }

    /// Applies pending schema migrations and switches the journal to WAL.
    ///
    /// Returns the number of migrations applied.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or a migration fails.
    #[instrument(skip(self))]
    pub fn run_migrations(&self) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        conn.batch_execute("PRAGMA journal_mode = WAL;")
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(DbErrorKind::Migration, e.to_string()))?;
        info!(count = applied.len(), "Migrations applied");
        Ok(applied.len())
    }

    /// Inserts a record for `outcome` with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self), fields(outcome = %outcome))]
    pub fn create(&self, outcome: Outcome) -> Result<MatchRecord, DbError> {
        let mut conn = self.connection()?;
        let record = insert(&mut conn, outcome)?;
        info!(id = record.id(), winner = %record.winner(), "Match recorded");
        Ok(record)
    }

    /// Returns up to [`RECENT_LIMIT`] records, newest first.
    ///
    /// Records created at the same instant are ordered by descending id.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_recent(&self) -> Result<Vec<MatchRecord>, DbError> {
        let mut conn = self.connection()?;
        let records = match_records::table
            .order((match_records::created_at.desc(), match_records::id.desc()))
            .limit(RECENT_LIMIT)
            .select(MatchRecord::as_select())
            .load(&mut conn)?;
        debug!(count = records.len(), "Recent matches loaded");
        Ok(records)
    }

    /// Counts all stored records.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count(&self) -> Result<i64, DbError> {
        let mut conn = self.connection()?;
        Ok(match_records::table.count().get_result(&mut conn)?)
    }

    /// Deletes the record with `id`. A missing id deletes nothing.
    ///
    /// Returns the number of rows removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_one(&self, id: i32) -> Result<usize, DbError> {
        let mut conn = self.connection()?;
        let deleted = diesel::delete(match_records::table.find(id)).execute(&mut conn)?;
        info!(id, deleted, "Match delete");
        Ok(deleted)
    }

    /// Deletes every record whose id is in `ids`, all or nothing.
    ///
    /// Unknown ids are ignored and an empty slice touches nothing.
    /// Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; no row is removed then.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub fn delete_many(&self, ids: &[i32]) -> Result<usize, DbError> {
        if ids.is_empty() {
            debug!("No ids given, nothing to delete");
            return Ok(0);
        }
        let mut conn = self.connection()?;
        let deleted = conn.immediate_transaction::<_, DbError, _>(|conn| {
            let mut deleted = 0;
            for chunk in ids.chunks(DELETE_CHUNK) {
                deleted += diesel::delete(
                    match_records::table.filter(match_records::id.eq_any(chunk.to_vec())),
                )
                .execute(conn)?;
            }
            Ok(deleted)
        })?;
        info!(deleted, "Match batch delete");
        Ok(deleted)
    }

    /// Inserts [`SEED_OUTCOMES`] in order if the store holds no records.
    ///
    /// The emptiness check and the inserts share one transaction, so
    /// concurrent startups seed at most once. Returns the records inserted,
    /// which is empty when the store already had data.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn seed_if_empty(&self) -> Result<Vec<MatchRecord>, DbError> {
        let mut conn = self.connection()?;
        let seeded = conn.immediate_transaction::<_, DbError, _>(|conn| {
            let existing: i64 = match_records::table.count().get_result(conn)?;
            if existing > 0 {
                debug!(existing, "Store not empty, skipping seed");
                return Ok(Vec::new());
            }
            SEED_OUTCOMES
                .into_iter()
                .map(|outcome| insert(conn, outcome))
                .collect()
        })?;
        if !seeded.is_empty() {
            info!(count = seeded.len(), "Seeded empty match history");
        }
        Ok(seeded)
    }
}

fn insert(conn: &mut SqliteConnection, outcome: Outcome) -> Result<MatchRecord, DbError> {
    Ok(diesel::insert_into(match_records::table)
        .values(&NewMatchRecord::from_outcome(outcome))
        .returning(MatchRecord::as_returning())
        .get_result(conn)?)
}

//! Tic-tac-toe match history: storage, HTTP API and client.
//!
//! # Architecture
//!
//! - **db**: diesel/SQLite repository of [`MatchRecord`]s
//! - **service**: [`HistoryService`], validation in front of the repository
//! - **api**: axum router exposing `/api/games`
//! - **client**: [`HistoryClient`], the consumer side of that API
//! - **play**: terminal hot-seat game that posts outcomes via the client
//!
//! # Example
//!
//! ```no_run
//! use tictac_history::{HistoryService, MatchRepository};
//!
//! # fn example() -> anyhow::Result<()> {
//! let service = HistoryService::new(MatchRepository::new("history.db".to_string())?);
//! service.bootstrap()?;
//! let record = service.create("draw")?;
//! assert_eq!(service.list()?[0].id(), record.id());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod client;
mod config;
mod db;
mod error;
mod play;
mod server;
mod service;

// Crate-level exports - HTTP surface
pub use api::{ApiError, BATCH_DELETE_PATH, ErrorBody, GAMES_PATH, router};

// Crate-level exports - Client
pub use client::{DEFAULT_SERVER_URL, HistoryClient};

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_URL_VAR, PORT_VAR, ServerConfig};

// Crate-level exports - Persistence
pub use db::{
    DbError, DbErrorKind, MatchRecord, MatchRepository, NewMatchRecord, RECENT_LIMIT,
    SEED_OUTCOMES,
};

// Crate-level exports - Errors and service
pub use error::{HistoryError, ValidationError};
pub use service::HistoryService;

// Crate-level exports - Terminal play and server startup
pub use play::{PlayCommand, outcome_message, run_hot_seat};
pub use server::run_server;

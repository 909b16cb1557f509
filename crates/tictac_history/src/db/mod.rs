//! Database persistence layer for finished-game records.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{MatchRecord, NewMatchRecord};
pub use repository::{MatchRepository, RECENT_LIMIT, SEED_OUTCOMES};

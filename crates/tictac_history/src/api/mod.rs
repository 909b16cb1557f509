//! HTTP surface for the match history.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/games` | 200, up to 10 records, newest first |
//! | POST | `/api/games` | 201, created record |
//! | DELETE | `/api/games/{id}` | 204 |
//! | POST | `/api/games/batch-delete` | 204 |
//! | GET | `/health` | 200 `OK` |
//!
//! Malformed input is answered with 400 and an [`ErrorBody`].

mod error;
mod handlers;

pub use error::{ApiError, ErrorBody};

use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tracing::{info, instrument};

use crate::service::HistoryService;

/// Path of the game collection.
pub const GAMES_PATH: &str = "/api/games";
/// Path of the batch delete endpoint.
pub const BATCH_DELETE_PATH: &str = "/api/games/batch-delete";

/// Builds the router with every history endpoint.
#[instrument(skip(service))]
pub fn router(service: HistoryService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            GAMES_PATH,
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(BATCH_DELETE_PATH, post(handlers::batch_delete_games))
        .route("/api/games/{id}", delete(handlers::delete_game))
        .layer(ServiceBuilder::new().map_request(log_request))
        .with_state(service)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

async fn health() -> &'static str {
    "OK"
}

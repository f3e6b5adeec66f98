//! Route table.

use axum::routing::{get, post};
use axum::Router;

use crate::http::handlers;
use crate::http::server::AppState;

/// Map every endpoint to its handler.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz).post(handlers::healthz))
        .route("/random", get(handlers::random_element))
        .route("/index/{nr}", get(handlers::index_element))
        .route("/-/reload", post(handlers::reload))
        .with_state(state)
}

//! Request handlers.
//!
//! Query handlers only ever read the published snapshot; the reload handler
//! only ever calls the coordinator.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http::response::{json_element, text_error, QueryError};
use crate::http::server::AppState;

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}

/// One uniformly random element of the current snapshot.
pub async fn random_element(State(state): State<AppState>) -> Result<Response, QueryError> {
    let elements = state.store.get();
    let Some(index) = state.picker.pick(elements.len()) else {
        tracing::error!("no elements available");
        return Err(QueryError::Unavailable);
    };

    tracing::debug!(index, "random element");
    Ok(json_element(&elements[index]))
}

/// The element at `/index/{nr}`.
///
/// An empty snapshot is reported before the index token is looked at.
pub async fn index_element(
    State(state): State<AppState>,
    nr: Result<Path<String>, PathRejection>,
) -> Result<Response, QueryError> {
    let elements = state.store.get();
    if elements.is_empty() {
        tracing::error!("no elements available");
        return Err(QueryError::Unavailable);
    }

    let raw = match nr {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "invalid index");
            return Err(QueryError::InvalidIndex);
        }
    };

    let index: usize = match raw.parse() {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!(index = %raw, error = %e, "invalid index");
            return Err(QueryError::InvalidIndex);
        }
    };

    let Some(element) = elements.get(index) else {
        tracing::warn!(index, max = elements.len() - 1, "index out of range");
        return Err(QueryError::IndexOutOfRange);
    };

    tracing::debug!(index, "index element");
    Ok(json_element(element))
}

/// Reload the data file; same path as SIGHUP.
pub async fn reload(State(state): State<AppState>) -> Response {
    match state.coordinator.reload().await {
        Ok(_) => (StatusCode::OK, "ok").into_response(),
        Err(e) => {
            tracing::error!(error = %e, "reload not successful");
            text_error(StatusCode::INTERNAL_SERVER_ERROR, "reload not successful")
        }
    }
}

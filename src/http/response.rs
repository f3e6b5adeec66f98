//! Response construction.
//!
//! # Responsibilities
//! - Echo element bytes unmodified with a JSON content type
//! - Map each query failure to exactly one status and a fixed message
//!
//! # Design Decisions
//! - Error bodies are plain text terminated by a newline
//! - Out-of-range indices are 404: the index is well formed, the element
//!   just does not exist

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::data::Element;

/// Failures a query handler can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The published snapshot is empty.
    #[error("no elements available")]
    Unavailable,

    /// The index token is not a non-negative integer.
    #[error("invalid index")]
    InvalidIndex,

    /// The index is at or past the end of the snapshot.
    #[error("index out of range")]
    IndexOutOfRange,
}

impl QueryError {
    pub fn status(&self) -> StatusCode {
        match self {
            QueryError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
            QueryError::InvalidIndex => StatusCode::BAD_REQUEST,
            QueryError::IndexOutOfRange => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        text_error(self.status(), &self.to_string())
    }
}

/// Plain-text error body with a trailing newline.
pub fn text_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        format!("{message}\n"),
    )
        .into_response()
}

/// 200 with the element's original bytes as body.
pub fn json_element(element: &Element) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        Body::from(element.to_bytes()),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(QueryError::Unavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(QueryError::InvalidIndex.status(), StatusCode::BAD_REQUEST);
        assert_eq!(QueryError::IndexOutOfRange.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_error_body_has_trailing_newline() {
        let response = QueryError::InvalidIndex.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"invalid index\n");
    }
}

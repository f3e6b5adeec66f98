//! Route prefix normalisation and mounting.

use axum::Router;

/// Canonical form of a route prefix: `""` or `/segment[/segment...]`, never
/// with a trailing slash.
pub fn normalize_route_prefix(input: &str) -> String {
    let trimmed = input.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Mount `routes` under a normalised `prefix`; an empty prefix mounts at root.
pub fn mount(routes: Router, prefix: &str) -> Router {
    if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    }
}

//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    record_click_handler, resolve_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`              - Register a tracking link
/// - `GET    /links`              - List links, newest first
/// - `GET    /links/{id}`         - Fetch one link
/// - `DELETE /links/{id}`         - Deactivate a link
/// - `GET    /links/{id}/stats`   - Analytics for a link
/// - `GET    /track/{shortCode}`  - Resolve an active short code
/// - `POST   /track`              - Record a client-reported click
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(create_link_handler).get(list_links_handler))
        .route(
            "/links/{id}",
            get(get_link_handler).delete(delete_link_handler),
        )
        .route("/links/{id}/stats", get(stats_handler))
        .route("/track", post(record_click_handler))
        .route("/track/{short_code}", get(resolve_handler))
}

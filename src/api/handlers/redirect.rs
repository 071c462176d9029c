//! Handler for server-side short code redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use tracing::debug;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::{PeerAddr, resolve_client_ip};

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the code to an active link
/// 2. Hand the visit to a background recording task
/// 3. Return 307 Temporary Redirect without waiting for enrichment
///
/// Recording failures are logged by the task and never affect the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or its link is deactivated.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    PeerAddr(peer): PeerAddr,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let link = state
        .link_service
        .find_by_short_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "shortCode": code })))?;

    let click_event = ClickEvent::new(
        link.id,
        resolve_client_ip(&headers, peer, state.behind_proxy),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    debug!(%code, link_id = %link.id, "Redirecting");
    state.click_service.spawn_record(click_event);

    Ok(Redirect::temporary(&link.destination_url))
}

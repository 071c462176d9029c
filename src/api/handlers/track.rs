//! Handlers for client-side click tracking.
//!
//! A client resolves a short code, redirects the visitor itself, and then
//! reports the visit. Unlike the server-side redirect, the report waits
//! for enrichment so the response can carry the location.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header},
};
use serde_json::json;
use validator::Validate;

use super::parse_link_id;
use crate::api::dto::track::{RecordClickRequest, RecordClickResponse, ResolveResponse};
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::{PeerAddr, resolve_client_ip};

/// Resolves an active short code.
///
/// # Endpoint
///
/// `GET /api/track/{shortCode}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or its link is deactivated.
pub async fn resolve_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let link = state
        .link_service
        .find_by_short_code(&short_code)
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "shortCode": short_code })))?;

    Ok(Json(link.into()))
}

/// Records a click and returns its enriched summary.
///
/// # Endpoint
///
/// `POST /api/track`
///
/// # Request Body
///
/// ```json
/// { "linkId": "6f1c...", "referrer": "https://news.example" }
/// ```
///
/// The visitor address comes from the connection (or forwarding headers
/// when behind a proxy) and the user agent from the `User-Agent` header.
///
/// # Errors
///
/// Returns 400 Bad Request if `linkId` is missing or malformed.
/// Returns 404 Not Found if no link has this identifier.
pub async fn record_click_handler(
    State(state): State<AppState>,
    PeerAddr(peer): PeerAddr,
    headers: HeaderMap,
    Json(payload): Json<RecordClickRequest>,
) -> Result<Json<RecordClickResponse>, AppError> {
    payload.validate()?;

    let link_id = parse_link_id(payload.link_id.as_deref().unwrap_or_default())?;
    let event = ClickEvent::new(
        link_id,
        resolve_client_ip(&headers, peer, state.behind_proxy),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        payload.referrer.as_deref(),
    );

    let click = state
        .click_service
        .record(event.link_id, event.ip, event.user_agent, event.referrer)
        .await?;

    Ok(Json(click.into()))
}

//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use super::parse_link_id;
use crate::api::dto::links::{CreateLinkRequest, DeleteLinkResponse, LinkListResponse};
use crate::domain::entities::TrackingLink;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a tracking link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/page", "title": "Landing page" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is missing or not an absolute HTTP(S) URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<TrackingLink>), AppError> {
    payload.validate()?;

    let original_url = payload.original_url.unwrap_or_default();
    let link = state
        .link_service
        .create(&original_url, payload.title)
        .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// Lists every link, newest first, including deactivated ones.
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_all().await?;

    Ok(Json(LinkListResponse { links }))
}

/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<TrackingLink>, AppError> {
    let id = parse_link_id(&id)?;

    Ok(Json(state.link_service.get_link(id).await?))
}

/// Deactivates a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Behavior
///
/// The link and its click history are kept. It stops resolving by short
/// code, while its statistics stay readable.
///
/// # Errors
///
/// Returns 404 Not Found if no link has this identifier.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    let id = parse_link_id(&id)?;

    if !state.link_service.deactivate(id).await? {
        return Err(AppError::link_not_found(id));
    }

    Ok(Json(DeleteLinkResponse {
        message: "Link deleted successfully".to_string(),
    }))
}

//! Handler for link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use super::parse_link_id;
use crate::domain::link_stats::LinkStats;
use crate::error::AppError;
use crate::state::AppState;

/// Computes statistics for a link.
///
/// # Endpoint
///
/// `GET /api/links/{id}/stats`
///
/// # Response
///
/// Totals, unique visitors by address, clicks per country, a 30-day daily
/// series ending today (UTC), the top 10 referrers, the device breakdown
/// and the 10 most recent clicks. Deactivated links are included.
///
/// # Errors
///
/// Returns 404 Not Found if no link has this identifier.
pub async fn stats_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkStats>, AppError> {
    let id = parse_link_id(&id)?;

    Ok(Json(state.stats_service.compute(id).await?))
}

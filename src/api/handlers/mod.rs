//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;
pub mod track;

pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, get_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use stats::stats_handler;
pub use track::{record_click_handler, resolve_handler};

use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;

/// Parses a link identifier taken from a path or body.
pub(crate) fn parse_link_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request("Invalid link ID", json!({ "id": raw })))
}

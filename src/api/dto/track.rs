//! DTOs for click tracking endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{ClickRecord, TrackingLink};

/// What a client needs to redirect a visitor itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub id: Uuid,
    pub original_url: String,
    pub title: String,
    pub short_code: String,
}

impl From<TrackingLink> for ResolveResponse {
    fn from(link: TrackingLink) -> Self {
        Self {
            id: link.id,
            original_url: link.destination_url,
            title: link.title,
            short_code: link.short_code,
        }
    }
}

/// Click reported by a client after it resolved a short code.
///
/// The visitor address and user agent come from the request itself.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordClickRequest {
    #[validate(required(message = "Link ID is required"))]
    pub link_id: Option<String>,

    #[validate(length(max = 2048, message = "Referrer must be at most 2048 characters"))]
    pub referrer: Option<String>,
}

/// Summary of a stored click.
#[derive(Debug, Serialize)]
pub struct RecordClickResponse {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub country: Option<String>,
    pub city: Option<String>,
}

impl From<ClickRecord> for RecordClickResponse {
    fn from(click: ClickRecord) -> Self {
        Self {
            id: click.id,
            timestamp: click.timestamp,
            country: click.country,
            city: click.city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_response_fields() {
        let link = TrackingLink::new(
            Uuid::nil(),
            "abcdefghijkl".to_string(),
            "https://example.com/".to_string(),
            "Example".to_string(),
            Utc::now(),
        );

        let value = serde_json::to_value(ResolveResponse::from(link)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": Uuid::nil(),
                "originalUrl": "https://example.com/",
                "title": "Example",
                "shortCode": "abcdefghijkl",
            })
        );
    }

    #[test]
    fn test_record_request_requires_link_id() {
        let req: RecordClickRequest = serde_json::from_str(r#"{"referrer":"x"}"#).unwrap();

        assert!(req.validate().is_err());
    }
}

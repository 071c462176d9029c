//! DTOs for link management endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::TrackingLink;

/// Request to register a tracking link.
///
/// Only presence and size are checked here; URL syntax is validated by
/// the link service so the error carries the parser's reason.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(
        required(message = "Original URL is required"),
        length(min = 1, max = 2048, message = "URL must be 1-2048 characters")
    )]
    pub original_url: Option<String>,

    /// Defaults to the destination host when omitted or blank.
    #[validate(length(max = 200, message = "Title must be at most 200 characters"))]
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<TrackingLink>,
}

#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_camel_case() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"originalUrl":"https://example.com","title":"Home"}"#).unwrap();

        assert_eq!(req.original_url.as_deref(), Some("https://example.com"));
        assert_eq!(req.title.as_deref(), Some("Home"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_missing_url() {
        let req: CreateLinkRequest = serde_json::from_str(r#"{"title":"Home"}"#).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_title_too_long() {
        let req = CreateLinkRequest {
            original_url: Some("https://example.com".to_string()),
            title: Some("x".repeat(201)),
        };

        assert!(req.validate().is_err());
    }
}

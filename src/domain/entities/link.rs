//! Tracking link entity representing a short code to destination mapping.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A registered tracking link with its aggregate counters.
///
/// Links are never physically removed. Deactivation flips `is_active` to
/// `false` once and for all, which hides the link from redirect lookups while
/// keeping its click history available for analytics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingLink {
    pub id: Uuid,
    pub short_code: String,
    #[serde(rename = "originalUrl")]
    pub destination_url: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
    pub click_count: u64,
    #[serde(rename = "lastClicked", skip_serializing_if = "Option::is_none")]
    pub last_clicked_at: Option<DateTime<Utc>>,
}

impl TrackingLink {
    /// Creates a freshly registered, active link with zeroed counters.
    pub fn new(
        id: Uuid,
        short_code: String,
        destination_url: String,
        title: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            destination_url,
            title,
            created_at,
            is_active: true,
            click_count: 0,
            last_clicked_at: None,
        }
    }

    /// Applies one recorded click to the counters.
    pub fn register_click(&mut self, at: DateTime<Utc>) {
        self.click_count += 1;
        self.last_clicked_at = Some(at);
    }
}

/// Input data for registering a new link.
///
/// The repository assigns the identifier and creation timestamp.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub short_code: String,
    pub destination_url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> TrackingLink {
        TrackingLink::new(
            Uuid::new_v4(),
            "abc123".to_string(),
            "https://example.com/page".to_string(),
            "example.com".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_link_starts_active_with_zero_clicks() {
        let link = sample_link();

        assert!(link.is_active);
        assert_eq!(link.click_count, 0);
        assert!(link.last_clicked_at.is_none());
    }

    #[test]
    fn test_register_click_updates_counters() {
        let mut link = sample_link();
        let first = Utc::now();
        link.register_click(first);
        let second = Utc::now();
        link.register_click(second);

        assert_eq!(link.click_count, 2);
        assert_eq!(link.last_clicked_at, Some(second));
    }

    #[test]
    fn test_link_serializes_with_api_field_names() {
        let link = sample_link();
        let json = serde_json::to_value(&link).unwrap();

        assert_eq!(json["shortCode"], "abc123");
        assert_eq!(json["originalUrl"], "https://example.com/page");
        assert_eq!(json["isActive"], true);
        assert_eq!(json["clickCount"], 0);
        assert!(json.get("lastClicked").is_none());
    }
}

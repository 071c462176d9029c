//! Click event model for background click recording.

use uuid::Uuid;

use super::entities::NewClick;

/// User agent stored when the request carries none.
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// A visit captured on the request path, handed off for enrichment.
///
/// Built by the redirect handler from request metadata and passed to
/// [`crate::application::services::ClickService::spawn_record`], so the
/// visitor is redirected before geolocation completes.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: Uuid,
    pub ip: String,
    pub user_agent: String,
    pub referrer: Option<String>,
}

impl ClickEvent {
    /// Creates a new click event.
    ///
    /// A missing user agent is stored as `"Unknown"`; an empty referrer is
    /// treated as direct traffic.
    pub fn new(link_id: Uuid, ip: String, user_agent: Option<&str>, referrer: Option<&str>) -> Self {
        Self {
            link_id,
            ip,
            user_agent: user_agent.unwrap_or(UNKNOWN_USER_AGENT).to_string(),
            referrer: referrer
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
        }
    }
}

impl From<ClickEvent> for NewClick {
    fn from(event: ClickEvent) -> Self {
        Self {
            link_id: event.link_id,
            source_ip: event.ip,
            user_agent: event.user_agent,
            referrer: event.referrer,
        }
    }
}

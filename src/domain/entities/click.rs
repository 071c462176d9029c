//! Click record entity representing a single visit through a tracking link.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::device::DeviceInfo;
use super::location::LocationData;

/// An immutable observation of one visit.
///
/// Records are appended once and never modified or deleted; they form the
/// ledger every analytics view is derived from. Geographic fields are optional
/// so that records persisted without enrichment remain representable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRecord {
    pub id: Uuid,
    pub link_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "ipAddress")]
    pub source_ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub user_agent: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    pub device: DeviceInfo,
}

/// Visit details captured on the request path, before enrichment.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: Uuid,
    pub source_ip: String,
    pub user_agent: String,
    pub referrer: Option<String>,
}

impl ClickRecord {
    /// Assembles a record from captured visit details and enrichment results.
    pub fn from_visit(
        id: Uuid,
        timestamp: DateTime<Utc>,
        visit: NewClick,
        location: LocationData,
        device: DeviceInfo,
    ) -> Self {
        Self {
            id,
            link_id: visit.link_id,
            timestamp,
            source_ip: visit.source_ip,
            country: Some(location.country),
            city: Some(location.city),
            region: Some(location.region_name),
            latitude: Some(location.latitude),
            longitude: Some(location.longitude),
            user_agent: visit.user_agent,
            referrer: visit.referrer,
            device,
        }
    }
}

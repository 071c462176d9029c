//! Geographic data resolved from a visitor's IP address.

use serde::{Deserialize, Serialize};

/// Placeholder used for every textual field when a lookup fails.
pub const UNKNOWN: &str = "Unknown";

/// Location details attached to a click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    pub country: String,
    pub country_code: String,
    pub region: String,
    pub region_name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationData {
    /// Sentinel location returned whenever enrichment is unavailable.
    pub fn unknown() -> Self {
        Self {
            country: UNKNOWN.to_string(),
            country_code: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            region_name: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.country == UNKNOWN
    }
}

//! No-op lookup used when geolocation is disabled.

use async_trait::async_trait;
use tracing::debug;

use super::lookup::{GeoLookup, GeoLookupError};
use crate::domain::entities::LocationData;

/// A lookup that resolves every address to the unknown location.
///
/// Used when `GEOIP_ENABLED=false` or in tests that don't care about geography.
pub struct NullGeoLookup;

impl NullGeoLookup {
    pub fn new() -> Self {
        debug!("Using NullGeoLookup (geolocation disabled)");
        Self
    }
}

impl Default for NullGeoLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoLookup for NullGeoLookup {
    async fn lookup(&self, _ip: &str) -> Result<LocationData, GeoLookupError> {
        Ok(LocationData::unknown())
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_lookup_is_unknown() {
        let location = NullGeoLookup::new().lookup("8.8.8.8").await.unwrap();
        assert!(location.is_unknown());
    }
}

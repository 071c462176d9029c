//! Geolocation lookup abstraction.

use async_trait::async_trait;

use crate::domain::entities::LocationData;

/// Reasons a single lookup produced no location.
///
/// Never leaves the geolocation service; callers only ever see
/// [`LocationData::unknown`].
#[derive(Debug, thiserror::Error)]
pub enum GeoLookupError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("lookup failed: {0}")]
    Failed(String),

    #[error("unreadable response: {0}")]
    InvalidResponse(String),

    #[error("lookup timed out")]
    Timeout,
}

/// A source of IP geolocation data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolves `ip` to a location. A single attempt, no retries.
    async fn lookup(&self, ip: &str) -> Result<LocationData, GeoLookupError>;

    /// Provider name for logs and the health check.
    fn name(&self) -> &'static str;
}

//! Best-effort IP geolocation.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::entities::LocationData;
use crate::infrastructure::geolocation::{GeoLookup, GeoLookupError};

/// Resolves visitor addresses to locations without ever failing.
///
/// Each call makes exactly one bounded attempt. Transport errors, timeouts,
/// upstream failures, and unreadable bodies all fold into
/// [`LocationData::unknown`], so click recording never depends on the
/// provider being up.
pub struct GeolocationService {
    lookup: Arc<dyn GeoLookup>,
    timeout: Duration,
}

impl GeolocationService {
    pub fn new(lookup: Arc<dyn GeoLookup>, timeout: Duration) -> Self {
        Self { lookup, timeout }
    }

    pub async fn resolve(&self, ip: &str) -> LocationData {
        let result = tokio::time::timeout(self.timeout, self.lookup.lookup(ip))
            .await
            .unwrap_or(Err(GeoLookupError::Timeout));

        match result {
            Ok(location) => {
                debug!(ip, country = %location.country, "Resolved location");
                location
            }
            Err(e) => {
                metrics::counter!("geolocation_failures_total").increment(1);
                warn!(ip, provider = self.lookup.name(), error = %e, "Geolocation failed");
                LocationData::unknown()
            }
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.lookup.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::geolocation::MockGeoLookup;
    use async_trait::async_trait;

    fn testland() -> LocationData {
        LocationData {
            country: "Testland".to_string(),
            country_code: "TL".to_string(),
            region: "TR".to_string(),
            region_name: "Test Region".to_string(),
            city: "Testville".to_string(),
            latitude: 1.0,
            longitude: 2.0,
        }
    }

    fn service(lookup: impl GeoLookup + 'static) -> GeolocationService {
        GeolocationService::new(Arc::new(lookup), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock = MockGeoLookup::new();
        mock.expect_lookup()
            .withf(|ip| ip == "1.1.1.1")
            .times(1)
            .returning(|_| Ok(testland()));

        let location = service(mock).resolve("1.1.1.1").await;

        assert_eq!(location, testland());
    }

    #[tokio::test]
    async fn test_resolve_failure_is_unknown() {
        let mut mock = MockGeoLookup::new();
        mock.expect_lookup()
            .times(1)
            .returning(|_| Err(GeoLookupError::Failed("reserved range".to_string())));
        mock.expect_name().return_const("mock");

        let location = service(mock).resolve("10.0.0.1").await;

        assert_eq!(location, LocationData::unknown());
    }

    struct SlowLookup;

    #[async_trait]
    impl GeoLookup for SlowLookup {
        async fn lookup(&self, _ip: &str) -> Result<LocationData, GeoLookupError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(testland())
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test]
    async fn test_resolve_timeout_is_unknown() {
        let started = std::time::Instant::now();

        let location = service(SlowLookup).resolve("1.1.1.1").await;

        assert!(location.is_unknown());
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_provider_name() {
        let mut mock = MockGeoLookup::new();
        mock.expect_name().return_const("ip-api");

        assert_eq!(service(mock).provider_name(), "ip-api");
    }
}

//! ip-api.com compatible HTTP lookup.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::trace;

use super::lookup::{GeoLookup, GeoLookupError};
use crate::domain::entities::{LocationData, location::UNKNOWN};

/// Default lookup URL; `{ip}` is replaced with the visitor's address.
pub const DEFAULT_API_URL: &str = "http://ip-api.com/json/{ip}?fields=status,message,country,countryCode,region,regionName,city,lat,lon";

/// Response body of an ip-api style endpoint.
///
/// Every field is optional so partial answers still deserialize.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpApiResponse {
    status: Option<String>,
    message: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
    region: Option<String>,
    region_name: Option<String>,
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpApiResponse {
    fn into_location(self) -> Result<LocationData, GeoLookupError> {
        if self.status.as_deref() == Some("fail") {
            return Err(GeoLookupError::Failed(
                self.message.unwrap_or_else(|| "unspecified".to_string()),
            ));
        }

        let text = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

        Ok(LocationData {
            country: text(self.country),
            country_code: text(self.country_code),
            region: text(self.region),
            region_name: text(self.region_name),
            city: text(self.city),
            latitude: self.lat.unwrap_or(0.0),
            longitude: self.lon.unwrap_or(0.0),
        })
    }
}

/// Geolocation over an external HTTP API.
pub struct IpApiLookup {
    client: Client,
    url_template: String,
}

impl IpApiLookup {
    /// Builds a lookup with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GeoLookupError::Transport`] if the HTTP client cannot be built.
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, GeoLookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeoLookupError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    fn url_for(&self, ip: &str) -> String {
        self.url_template.replace("{ip}", ip)
    }
}

#[async_trait]
impl GeoLookup for IpApiLookup {
    async fn lookup(&self, ip: &str) -> Result<LocationData, GeoLookupError> {
        let url = self.url_for(ip);
        trace!(%url, "Geolocation request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GeoLookupError::Timeout
            } else {
                GeoLookupError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoLookupError::Status(status.as_u16()));
        }

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeoLookupError::InvalidResponse(e.to_string()))?;

        body.into_location()
    }

    fn name(&self) -> &'static str {
        "ip-api"
    }
}

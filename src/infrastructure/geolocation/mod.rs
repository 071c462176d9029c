//! IP geolocation providers.
//!
//! Provides a [`GeoLookup`] trait with two implementations:
//! - [`IpApiLookup`] - HTTP lookup against an ip-api compatible endpoint
//! - [`NullGeoLookup`] - Always unknown, for disabled geolocation

mod ip_api;
mod lookup;
mod null_lookup;

pub use ip_api::{DEFAULT_API_URL, IpApiLookup};
pub use lookup::{GeoLookup, GeoLookupError};
pub use null_lookup::NullGeoLookup;

#[cfg(test)]
pub use lookup::MockGeoLookup;

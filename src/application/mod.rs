//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers.
//!
//! # Available Services
//!
//! - [`services::LinkService`] - Link registry: creation, lookup, deactivation
//! - [`services::ClickService`] - Click enrichment and recording
//! - [`services::GeolocationService`] - Best-effort IP geolocation
//! - [`services::StatsService`] - Per-link analytics

pub mod services;

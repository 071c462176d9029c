//! Core domain entities representing the tracking data model.
//!
//! # Entity Types
//!
//! - [`TrackingLink`] - A short code mapped to a destination URL, with counters
//! - [`ClickRecord`] - One immutable visit through a tracking link
//! - [`DeviceInfo`] - Device classification derived from a user agent
//! - [`LocationData`] - Geographic data derived from an IP address
//!
//! Creation inputs use separate structs (`NewLink`, `NewClick`).

pub mod click;
pub mod device;
pub mod link;
pub mod location;

pub use click::{ClickRecord, NewClick};
pub use device::{Browser, DeviceCategory, DeviceInfo, OperatingSystem};
pub use link::{NewLink, TrackingLink};
pub use location::LocationData;

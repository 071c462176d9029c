//! Domain layer containing tracking entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Visit captured on the request path
//! - [`link_stats`] - Analytics derived from click history
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves the short code
//! 2. A [`click_event::ClickEvent`] is handed to the click service
//! 3. The event is enriched (device, location) in a background task
//! 4. The resulting click is appended via [`repositories::ClickRepository`]

pub mod click_event;
pub mod entities;
pub mod link_stats;
pub mod repositories;

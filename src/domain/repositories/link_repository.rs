//! Repository trait for tracking link data access.

use crate::domain::entities::{NewLink, TrackingLink};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for managing tracking links.
///
/// Links are never removed. Lookups here ignore the active flag; filtering
/// inactive links is the service's job.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryStore`] - Process-local store
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Registers a new active link with zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code was ever issued before,
    /// including to a deactivated link.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<TrackingLink, AppError>;

    /// Finds a link by short code, active or not.
    async fn find_by_code(&self, code: &str) -> Result<Option<TrackingLink>, AppError>;

    /// Finds a link by identifier, active or not.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<TrackingLink>, AppError>;

    /// Lists every link, newest first.
    async fn list(&self) -> Result<Vec<TrackingLink>, AppError>;

    /// Marks a link inactive.
    ///
    /// Returns `Ok(true)` if the link exists (whether or not it was already
    /// inactive), `Ok(false)` otherwise.
    async fn deactivate(&self, id: Uuid) -> Result<bool, AppError>;

    /// Increments the click counter by one and sets the last-clicked time.
    ///
    /// Returns `Ok(false)` if the link does not exist. Concurrent calls for the
    /// same link never lose an increment.
    async fn record_click(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;

    /// Short backend identifier reported by the health check.
    fn backend_name(&self) -> &'static str;
}

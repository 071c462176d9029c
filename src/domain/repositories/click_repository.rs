//! Repository trait for the click log.

use crate::domain::entities::ClickRecord;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Append-only store of click records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::InMemoryStore`] - Process-local store
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Appends a click and bumps the owning link's counters as one unit.
    ///
    /// Readers never observe the record without the counter update, or the
    /// other way round.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `click.link_id` matches no link; nothing
    /// is written in that case.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn append(&self, click: ClickRecord) -> Result<ClickRecord, AppError>;

    /// Returns every click recorded for a link, in append order.
    async fn list_for_link(&self, link_id: Uuid) -> Result<Vec<ClickRecord>, AppError>;
}

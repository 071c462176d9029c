//! Link analytics service.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::link_stats::LinkStats;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Service computing analytics for a link on demand.
///
/// Read-only. Results are recomputed from the full click history on every
/// call; a click still being enriched may not be included yet.
pub struct StatsService<L: LinkRepository + ?Sized, C: ClickRepository + ?Sized> {
    links: Arc<L>,
    clicks: Arc<C>,
}

impl<L: LinkRepository + ?Sized, C: ClickRepository + ?Sized> StatsService<L, C> {
    /// Creates a new statistics service.
    pub fn new(links: Arc<L>, clicks: Arc<C>) -> Self {
        Self { links, clicks }
    }

    /// Computes statistics for a link, active or not, as of today (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this identifier.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn compute(&self, link_id: Uuid) -> Result<LinkStats, AppError> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::link_not_found(link_id))?;

        let clicks = self.clicks.list_for_link(link_id).await?;

        Ok(LinkStats::compute(link, &clicks, Utc::now().date_naive()))
    }
}

//! Click recording service.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::GeolocationService;
use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{ClickRecord, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;
use crate::utils::user_agent::classify;

/// Service turning visits into enriched click records.
///
/// Background recording is bounded by a semaphore: once every permit is
/// taken, new tasks wait for a slot instead of being dropped.
pub struct ClickService<C: ClickRepository + ?Sized> {
    repository: Arc<C>,
    geolocation: Arc<GeolocationService>,
    permits: Arc<Semaphore>,
    concurrency: usize,
}

impl<C: ClickRepository + ?Sized> ClickService<C> {
    /// Creates a click service running at most `concurrency` background
    /// recordings at once.
    pub fn new(
        repository: Arc<C>,
        geolocation: Arc<GeolocationService>,
        concurrency: usize,
    ) -> Self {
        Self {
            repository,
            geolocation,
            permits: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        }
    }

    /// Records one visit.
    ///
    /// Classifies the user agent, resolves the address (degrading to an
    /// unknown location), then appends the click and bumps the link's
    /// counters atomically. Inactive links are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `link_id` matches no link; no record
    /// is produced in that case.
    pub async fn record(
        &self,
        link_id: Uuid,
        source_ip: String,
        user_agent: String,
        referrer: Option<String>,
    ) -> Result<ClickRecord, AppError> {
        self.record_visit(NewClick {
            link_id,
            source_ip,
            user_agent,
            referrer,
        })
        .await
    }

    async fn record_visit(&self, visit: NewClick) -> Result<ClickRecord, AppError> {
        let device = classify(&visit.user_agent);
        let location = self.geolocation.resolve(&visit.source_ip).await;
        let located = !location.is_unknown();

        let click = ClickRecord::from_visit(Uuid::new_v4(), Utc::now(), visit, location, device);
        let click = self.repository.append(click).await?;

        metrics::counter!("clicks_recorded_total").increment(1);
        debug!(
            click_id = %click.id,
            link_id = %click.link_id,
            located,
            "Click recorded"
        );

        Ok(click)
    }

    /// Background permits currently free.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

impl<C: ClickRepository + ?Sized + 'static> ClickService<C> {
    /// Records a visit in a detached task so the caller can respond first.
    ///
    /// The task waits for a permit, runs to completion, and logs failures
    /// instead of surfacing them. The handle is only useful to tests.
    pub fn spawn_record(self: &Arc<Self>, event: ClickEvent) -> JoinHandle<()> {
        let service = Arc::clone(self);

        tokio::spawn(async move {
            let Ok(_permit) = service.permits.clone().acquire_owned().await else {
                error!("Click worker semaphore closed, dropping click");
                metrics::counter!("clicks_failed_total").increment(1);
                return;
            };

            let link_id = event.link_id;
            if let Err(e) = service.record_visit(event.into()).await {
                metrics::counter!("clicks_failed_total").increment(1);
                warn!(%link_id, error = %e, "Failed to record click");
            }
        })
    }
}

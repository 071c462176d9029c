//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ClickService, GeolocationService, LinkService, StatsService};
use crate::domain::repositories::{ClickRepository, LinkRepository};

/// Handles to the services, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub click_service: Arc<ClickService<dyn ClickRepository>>,
    pub stats_service: Arc<StatsService<dyn LinkRepository, dyn ClickRepository>>,
    pub geolocation: Arc<GeolocationService>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for the visitor address.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires the services over the given stores.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        click_repository: Arc<dyn ClickRepository>,
        geolocation: GeolocationService,
        click_worker_concurrency: usize,
        behind_proxy: bool,
    ) -> Self {
        let geolocation = Arc::new(geolocation);

        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            click_service: Arc::new(ClickService::new(
                click_repository.clone(),
                geolocation.clone(),
                click_worker_concurrency,
            )),
            stats_service: Arc::new(StatsService::new(link_repository, click_repository)),
            geolocation,
            behind_proxy,
        }
    }
}

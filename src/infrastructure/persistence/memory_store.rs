//! Process-local store backing both repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{ClickRecord, NewLink, TrackingLink};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

#[derive(Default)]
struct StoreState {
    links: HashMap<Uuid, TrackingLink>,
    codes: HashMap<String, Uuid>,
    /// Link ids in creation order.
    order: Vec<Uuid>,
    clicks: HashMap<Uuid, Vec<ClickRecord>>,
}

/// In-memory link registry and click log.
///
/// A single `RwLock` guards links and clicks together, so appending a click
/// and bumping its link's counters happen under one write lock. Data lives as
/// long as the process.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<TrackingLink, AppError> {
        let mut state = self.state.write().await;

        if state.codes.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Short code already issued",
                json!({ "short_code": new_link.short_code }),
            ));
        }

        let link = TrackingLink::new(
            Uuid::new_v4(),
            new_link.short_code,
            new_link.destination_url,
            new_link.title,
            Utc::now(),
        );

        state.codes.insert(link.short_code.clone(), link.id);
        state.order.push(link.id);
        state.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<TrackingLink>, AppError> {
        let state = self.state.read().await;

        Ok(state
            .codes
            .get(code)
            .and_then(|id| state.links.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TrackingLink>, AppError> {
        Ok(self.state.read().await.links.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<TrackingLink>, AppError> {
        let state = self.state.read().await;

        Ok(state
            .order
            .iter()
            .rev()
            .filter_map(|id| state.links.get(id))
            .cloned()
            .collect())
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;

        match state.links.get_mut(&id) {
            Some(link) => {
                link.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_click(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        let mut state = self.state.write().await;

        match state.links.get_mut(&id) {
            Some(link) => {
                link.register_click(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        let _state = self.state.read().await;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl ClickRepository for InMemoryStore {
    async fn append(&self, click: ClickRecord) -> Result<ClickRecord, AppError> {
        let mut state = self.state.write().await;

        let Some(link) = state.links.get_mut(&click.link_id) else {
            return Err(AppError::link_not_found(click.link_id));
        };
        link.register_click(click.timestamp);

        state
            .clicks
            .entry(click.link_id)
            .or_default()
            .push(click.clone());

        Ok(click)
    }

    async fn list_for_link(&self, link_id: Uuid) -> Result<Vec<ClickRecord>, AppError> {
        Ok(self
            .state
            .read()
            .await
            .clicks
            .get(&link_id)
            .cloned()
            .unwrap_or_default())
    }
}

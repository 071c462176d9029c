//! Tracking link registry service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::{NewLink, TrackingLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_well_formed};
use crate::utils::url_validator::validate_url;

/// Attempts at finding an unused short code before giving up.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service owning the set of tracking links.
///
/// Handles URL validation, short code assignment, lookups, and deactivation.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Registers a new tracking link.
    ///
    /// The title defaults to the destination's host when omitted or blank.
    /// A fresh short code is generated, and regenerated on collision with any
    /// code issued before, up to 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not an absolute HTTP(S) URL.
    ///
    /// Returns [`AppError::Internal`] if no unused code was found or on storage errors.
    pub async fn create(
        &self,
        destination_url: &str,
        title: Option<String>,
    ) -> Result<TrackingLink, AppError> {
        let url = validate_url(destination_url).map_err(AppError::invalid_url)?;

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.host().to_string());
        let destination_url = url.into_string();

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let short_code = generate_code().map_err(|e| {
                AppError::internal(
                    "Failed to generate short code",
                    json!({ "reason": e.to_string() }),
                )
            })?;

            let new_link = NewLink {
                short_code,
                destination_url: destination_url.clone(),
                title: title.clone(),
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    info!(id = %link.id, code = %link.short_code, "Link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, "Short code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Looks up an active link by short code.
    ///
    /// Deactivated links and codes that could never have been issued
    /// resolve to `None`.
    pub async fn find_by_short_code(&self, code: &str) -> Result<Option<TrackingLink>, AppError> {
        if !is_well_formed(code) {
            return Ok(None);
        }

        Ok(self
            .repository
            .find_by_code(code)
            .await?
            .filter(|link| link.is_active))
    }

    /// Looks up a link by identifier, active or not.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TrackingLink>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Retrieves a link by identifier, active or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this identifier.
    pub async fn get_link(&self, id: Uuid) -> Result<TrackingLink, AppError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::link_not_found(id))
    }

    /// All links, newest first.
    pub async fn list_all(&self) -> Result<Vec<TrackingLink>, AppError> {
        self.repository.list().await
    }

    /// Deactivates a link. Returns `false` if it does not exist.
    ///
    /// Click history is kept; the link stops resolving by short code.
    pub async fn deactivate(&self, id: Uuid) -> Result<bool, AppError> {
        let found = self.repository.deactivate(id).await?;
        if found {
            info!(%id, "Link deactivated");
        }
        Ok(found)
    }

    /// Bumps the click counter and last-clicked time of a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this identifier.
    pub async fn record_click_occurred(&self, id: Uuid) -> Result<(), AppError> {
        if self.repository.record_click(id, Utc::now()).await? {
            Ok(())
        } else {
            Err(AppError::link_not_found(id))
        }
    }

    /// Checks the backing store, returning its name.
    pub async fn check_storage(&self) -> Result<&'static str, AppError> {
        self.repository.ping().await?;
        Ok(self.repository.backend_name())
    }

    pub fn backend_name(&self) -> &'static str {
        self.repository.backend_name()
    }
}

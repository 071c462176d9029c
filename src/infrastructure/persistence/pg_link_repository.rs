//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewLink, TrackingLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "id, short_code, destination_url, title, created_at, is_active, click_count, last_clicked_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    id: Uuid,
    short_code: String,
    destination_url: String,
    title: String,
    created_at: DateTime<Utc>,
    is_active: bool,
    click_count: i64,
    last_clicked_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for TrackingLink {
    fn from(row: LinkRow) -> Self {
        Self {
            id: row.id,
            short_code: row.short_code,
            destination_url: row.destination_url,
            title: row.title,
            created_at: row.created_at,
            is_active: row.is_active,
            click_count: u64::try_from(row.click_count).unwrap_or_default(),
            last_clicked_at: row.last_clicked_at,
        }
    }
}

/// PostgreSQL repository for tracking links.
///
/// The unique constraint on `short_code` spans deactivated rows too, so a code
/// is never handed out twice.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<TrackingLink, AppError> {
        let row: LinkRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO tracking_links (id, short_code, destination_url, title)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_link.short_code)
        .bind(&new_link.destination_url)
        .bind(&new_link.title)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<TrackingLink>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM tracking_links WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<TrackingLink>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM tracking_links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<TrackingLink>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as(&format!(
            "SELECT {LINK_COLUMNS} FROM tracking_links ORDER BY created_at DESC, id"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE tracking_links SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE tracking_links
            SET click_count = click_count + 1, last_clicked_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

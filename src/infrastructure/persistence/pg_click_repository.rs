//! PostgreSQL implementation of the click log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{
    Browser, ClickRecord, DeviceCategory, DeviceInfo, OperatingSystem,
};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct ClickRow {
    id: Uuid,
    link_id: Uuid,
    clicked_at: DateTime<Utc>,
    source_ip: String,
    country: Option<String>,
    city: Option<String>,
    region: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    user_agent: String,
    referrer: Option<String>,
    browser: String,
    os: String,
    device_category: String,
    is_mobile: bool,
}

impl From<ClickRow> for ClickRecord {
    fn from(row: ClickRow) -> Self {
        Self {
            id: row.id,
            link_id: row.link_id,
            timestamp: row.clicked_at,
            source_ip: row.source_ip,
            country: row.country,
            city: row.city,
            region: row.region,
            latitude: row.latitude,
            longitude: row.longitude,
            user_agent: row.user_agent,
            referrer: row.referrer,
            device: DeviceInfo {
                browser: Browser::from_str(&row.browser).unwrap_or(Browser::Unknown),
                os: OperatingSystem::from_str(&row.os).unwrap_or(OperatingSystem::Unknown),
                category: DeviceCategory::from_str(&row.device_category)
                    .unwrap_or(DeviceCategory::Desktop),
                is_mobile: row.is_mobile,
            },
        }
    }
}

/// PostgreSQL click log.
///
/// Each append runs in a transaction that bumps the link counter first, so a
/// missing link aborts before anything is inserted.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn append(&self, click: ClickRecord) -> Result<ClickRecord, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE tracking_links
            SET click_count = click_count + 1, last_clicked_at = $2
            WHERE id = $1
            "#,
        )
        .bind(click.link_id)
        .bind(click.timestamp)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::link_not_found(click.link_id));
        }

        sqlx::query(
            r#"
            INSERT INTO click_records (
                id, link_id, clicked_at, source_ip, country, city, region,
                latitude, longitude, user_agent, referrer,
                browser, os, device_category, is_mobile
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(click.id)
        .bind(click.link_id)
        .bind(click.timestamp)
        .bind(&click.source_ip)
        .bind(&click.country)
        .bind(&click.city)
        .bind(&click.region)
        .bind(click.latitude)
        .bind(click.longitude)
        .bind(&click.user_agent)
        .bind(&click.referrer)
        .bind(click.device.browser.to_string())
        .bind(click.device.os.to_string())
        .bind(click.device.category.to_string())
        .bind(click.device.is_mobile)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(click)
    }

    async fn list_for_link(&self, link_id: Uuid) -> Result<Vec<ClickRecord>, AppError> {
        let rows: Vec<ClickRow> = sqlx::query_as(
            r#"
            SELECT id, link_id, clicked_at, source_ip, country, city, region,
                   latitude, longitude, user_agent, referrer,
                   browser, os, device_category, is_mobile
            FROM click_records
            WHERE link_id = $1
            ORDER BY seq
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

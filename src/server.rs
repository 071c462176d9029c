//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, geolocation setup, and the Axum server lifecycle.

use crate::application::services::GeolocationService;
use crate::config::Config;
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::infrastructure::geolocation::{GeoLookup, IpApiLookup, NullGeoLookup};
use crate::infrastructure::persistence::{InMemoryStore, PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory store
/// - Geolocation lookup (ip-api or disabled)
/// - Services and shared state
/// - Axum HTTP server with connect info and graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The geolocation client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (link_repository, click_repository) = build_storage(&config).await?;

    let lookup: Arc<dyn GeoLookup> = if config.geoip_enabled {
        let timeout = Duration::from_millis(config.geoip_timeout_ms);
        Arc::new(
            IpApiLookup::new(config.geoip_api_url.clone(), timeout)
                .context("Failed to build geolocation client")?,
        )
    } else {
        tracing::info!("Geolocation disabled");
        Arc::new(NullGeoLookup::new())
    };
    let geolocation =
        GeolocationService::new(lookup, Duration::from_millis(config.geoip_timeout_ms));

    let state = AppState::new(
        link_repository,
        click_repository,
        geolocation,
        config.click_worker_concurrency,
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Connects to PostgreSQL and applies migrations, or falls back to memory.
async fn build_storage(
    config: &Config,
) -> Result<(Arc<dyn LinkRepository>, Arc<dyn ClickRepository>)> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("Using in-memory storage");
        let store = Arc::new(InMemoryStore::new());
        let links: Arc<dyn LinkRepository> = store.clone();
        let clicks: Arc<dyn ClickRepository> = store;
        return Ok((links, clicks));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let pool = Arc::new(pool);
    let links: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks: Arc<dyn ClickRepository> = Arc::new(PgClickRepository::new(pool));
    Ok((links, clicks))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

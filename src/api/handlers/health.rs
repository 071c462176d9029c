//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Storage**: Pings the link store and reports its backend
/// 2. **Geolocation**: Reports the configured provider
/// 3. **Click Workers**: Reports free background recording slots
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Backend: memory" },
///     "geolocation": { "status": "ok", "message": "Provider: ip-api" },
///     "click_workers": { "status": "ok", "message": "Available: 64/64" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage_check = check_storage(&state).await;

    let geolocation_check =
        CheckStatus::ok(format!("Provider: {}", state.geolocation.provider_name()));

    let workers_check = CheckStatus::ok(format!(
        "Available: {}/{}",
        state.click_service.available_permits(),
        state.click_service.concurrency()
    ));

    let all_healthy = storage_check.is_ok() && geolocation_check.is_ok() && workers_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            storage: storage_check,
            geolocation: geolocation_check,
            click_workers: workers_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.link_service.check_storage().await {
        Ok(backend) => CheckStatus::ok(format!("Backend: {backend}")),
        Err(e) => CheckStatus::error(format!(
            "Backend {} unreachable: {e}",
            state.link_service.backend_name()
        )),
    }
}

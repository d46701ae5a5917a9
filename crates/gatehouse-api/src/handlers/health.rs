//! Health probe.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::response::HealthResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /api/health` — reports whether the shared store is reachable.
/// Exempt from rate limiting so probes never starve.
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let reachable = state.store.health_check().await.unwrap_or(false);

    Ok(Json(HealthResponse {
        status: if reachable { "ok" } else { "degraded" }.to_string(),
        store: state.config.store.provider.clone(),
        timestamp: Utc::now(),
    }))
}

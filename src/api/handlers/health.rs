//! Health check handler

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health - Health check
///
/// Returns 200 OK if the store is reachable, 503 Service Unavailable if not.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let healthy = state
        .with_store(|store| Ok(store.is_initialized()))
        .await
        .unwrap_or(false);

    if healthy {
        Ok(Json(HealthResponse {
            status: "healthy".to_string(),
            error: None,
        }))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                error: Some("Storage unavailable".to_string()),
            }),
        ))
    }
}

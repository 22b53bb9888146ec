//! Health check handler.

use axum::Json;
use axum::extract::State;

use clinic_database::DatabaseStatus;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health and GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db_pool {
        None => "in_memory",
        Some(pool) => pool.status().await.as_str(),
    };
    let status = if database == DatabaseStatus::Unavailable.as_str() {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}

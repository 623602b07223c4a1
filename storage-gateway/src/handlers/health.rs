use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// Liveness probe. The provider is not contacted.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        bucket: state.storage.bucket().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

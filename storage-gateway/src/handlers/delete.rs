use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::GatewayResult;
use crate::models::DeleteResponse;
use crate::AppState;

/// Handle `DELETE /delete/:path`
///
/// Nested paths must arrive with `/` percent-encoded as `%2F`.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> GatewayResult<Json<DeleteResponse>> {
    tracing::info!("Received delete request: {}", path);

    let data = state.storage.remove(&[path]).await?;

    Ok(Json(DeleteResponse {
        message: "File deleted successfully".to_string(),
        data,
    }))
}

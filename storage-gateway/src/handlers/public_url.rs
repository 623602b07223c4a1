use axum::{extract::State, Json};
use bytes::Bytes;

use crate::error::{GatewayError, GatewayResult};
use crate::models::{PublicUrlRequest, PublicUrlResponse};
use crate::AppState;

/// Handle `GET /file`
///
/// The path arrives in a JSON body even though this is a GET. Whether the
/// object exists is left to the provider; a wrong path yields a dead link.
pub async fn get_public_url(
    State(state): State<AppState>,
    body: Bytes,
) -> GatewayResult<Json<PublicUrlResponse>> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        PublicUrlRequest::default()
    } else {
        serde_json::from_slice::<PublicUrlRequest>(&body)
            .map_err(|e| GatewayError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    let path = request
        .path
        .ok_or_else(|| GatewayError::BadRequest("No path provided".to_string()))?;

    let url = state.storage.public_url(&path)?;
    tracing::info!("Public URL resolved: {} -> {}", path, url);

    Ok(Json(PublicUrlResponse { url }))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the gateway handlers
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Required input missing or unreadable, detected locally
    #[error("{0}")]
    BadRequest(String),

    /// Failure reported by the storage provider, message kept verbatim
    #[error("{0}")]
    Upstream(String),
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            GatewayError::BadRequest(message) => tracing::warn!("Bad request: {}", message),
            GatewayError::Upstream(message) => tracing::error!("Storage provider error: {}", message),
        }

        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

impl From<StorageError> for GatewayError {
    fn from(err: StorageError) -> Self {
        GatewayError::Upstream(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

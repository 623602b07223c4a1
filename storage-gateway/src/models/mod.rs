use serde::{Deserialize, Serialize};

use crate::storage::UploadedObject;

/// Prefix every uploaded object is stored under
pub const UPLOAD_PREFIX: &str = "uploads";

/// Object path for a new upload: `uploads/<unix-millis>-<filename>`.
///
/// Uniqueness rests on the timestamp alone, so two uploads of the same
/// filename within one millisecond resolve to the same path.
pub fn upload_path(timestamp_millis: i64, filename: &str) -> String {
    format!("{}/{}-{}", UPLOAD_PREFIX, timestamp_millis, filename)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_path: String,
    pub data: UploadedObject,
}

/// Body of `GET /file`
#[derive(Debug, Default, Deserialize)]
pub struct PublicUrlRequest {
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublicUrlResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub bucket: String,
    pub version: String,
}

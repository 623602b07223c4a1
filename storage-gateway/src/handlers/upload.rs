use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;

use crate::error::{GatewayError, GatewayResult};
use crate::models::{upload_path, UploadResponse};
use crate::AppState;

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";
const NO_FILE_MESSAGE: &str = "No file uploaded";

struct FilePart {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// Handle `POST /upload`
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> GatewayResult<Json<UploadResponse>> {
    tracing::info!("Received file upload request");

    // A body that is not multipart at all carries no file
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Upload body is not multipart: {}", e);
        GatewayError::BadRequest(NO_FILE_MESSAGE.to_string())
    })?;

    let file = read_file_part(&mut multipart)
        .await?
        .ok_or_else(|| GatewayError::BadRequest(NO_FILE_MESSAGE.to_string()))?;

    tracing::info!(
        "File received: filename={}, size={} bytes, content_type={:?}",
        file.filename,
        file.data.len(),
        file.content_type
    );

    let file_path = upload_path(Utc::now().timestamp_millis(), &file.filename);

    let data = state
        .storage
        .upload(&file_path, file.data, file.content_type.as_deref())
        .await?;

    tracing::info!("File uploaded successfully: {}", file_path);

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_path,
        data,
    }))
}

/// First `file` field that carries a filename; plain text fields are skipped.
async fn read_file_part(multipart: &mut Multipart) -> GatewayResult<Option<FilePart>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::BadRequest(format!("Invalid multipart: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        tracing::debug!("Processing field: {}", field_name);

        if field_name != FILE_FIELD {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);

        let data = field
            .bytes()
            .await
            .map_err(|e| GatewayError::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(Some(FilePart {
            filename,
            content_type,
            data,
        }));
    }

    Ok(None)
}

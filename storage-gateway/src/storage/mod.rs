// Storage module for the remote object-storage provider

pub mod supabase_client;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

pub use supabase_client::SupabaseStorageClient;

/// Storage provider error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Non-success response from the provider; `message` is the provider's own text
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("Invalid storage URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response from storage provider: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Transport(err.to_string())
    }
}

/// Metadata the provider returns for a stored object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedObject {
    pub path: String,
    pub id: Option<String>,
    /// Bucket-qualified key, e.g. `mani/uploads/1700000000000-a.png`
    pub full_path: String,
}

/// Operations the gateway forwards to the object-storage provider.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Name of the bucket every operation targets
    fn bucket(&self) -> &str;

    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadedObject, StorageError>;

    /// Public URL for `path`. Existence of the object is not checked.
    fn public_url(&self, path: &str) -> Result<String, StorageError>;

    /// Remove the given paths, returning the provider's response unchanged.
    async fn remove(&self, paths: &[String]) -> Result<serde_json::Value, StorageError>;
}

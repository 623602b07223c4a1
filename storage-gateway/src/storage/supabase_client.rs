//! Supabase Storage REST client
//!
//! Speaks the storage API exposed under `{endpoint}/storage/v1`. Every request
//! authenticates with the configured API key, sent both as a bearer token and
//! as the `apikey` header.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};
use url::Url;

use super::{StorageError, StorageProvider, UploadedObject};
use crate::config::StorageConfig;

/// Content type used when the upload declares none
const DEFAULT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";
const DEFAULT_CACHE_CONTROL: &str = "max-age=3600";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Id")]
    id: Option<String>,
}

pub struct SupabaseStorageClient {
    config: StorageConfig,
    http_client: Client,
    base_url: Url,
}

impl SupabaseStorageClient {
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        info!("Initializing storage client for bucket: {}", config.bucket);

        let base_url = Url::parse(&config.endpoint)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", config.endpoint, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StorageError::InvalidUrl(config.endpoint.clone()));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            http_client,
            base_url,
        })
    }

    /// `{endpoint}/storage/v1/object/<prefix...>/<bucket>/<path>`, each path segment encoded.
    ///
    /// Leading slashes are stripped. Empty, `.` and `..` segments are dropped
    /// rather than resolved, so `/uploads//a.png` and `uploads/../a.png` both
    /// address `uploads/a.png` and a path never climbs out of the bucket.
    fn object_url(&self, prefix: &[&str], path: Option<&str>) -> Result<Url, StorageError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StorageError::InvalidUrl(self.config.endpoint.clone()))?;
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "object"])
                .extend(prefix)
                .push(&self.config.bucket);
            if let Some(path) = path {
                segments.extend(object_segments(path));
            }
        }
        Ok(url)
    }

    async fn api_error(response: reqwest::Response) -> StorageError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = provider_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            }
        });

        error!("Storage request failed: {} - {}", status, message);
        StorageError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

fn object_segments(path: &str) -> impl Iterator<Item = &str> {
    path.trim_start_matches('/')
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
}

/// Pull the human-readable text out of a `{statusCode, error, message}` body.
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl StorageProvider for SupabaseStorageClient {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    async fn upload(
        &self,
        path: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<UploadedObject, StorageError> {
        debug!("Uploading object: {} ({} bytes)", path, data.len());

        let url = self.object_url(&[], Some(path))?;
        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
            .header(
                reqwest::header::CONTENT_TYPE,
                content_type.unwrap_or(DEFAULT_CONTENT_TYPE),
            )
            .header(reqwest::header::CACHE_CONTROL, DEFAULT_CACHE_CONTROL)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))?;

        info!("Object uploaded: {}", body.key);
        Ok(UploadedObject {
            path: path.to_string(),
            id: body.id,
            full_path: body.key,
        })
    }

    fn public_url(&self, path: &str) -> Result<String, StorageError> {
        self.object_url(&["public"], Some(path)).map(String::from)
    }

    async fn remove(&self, paths: &[String]) -> Result<serde_json::Value, StorageError> {
        debug!("Removing objects: {:?}", paths);

        let url = self.object_url(&[], None)?;
        let response = self
            .http_client
            .delete(url)
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let removed = response
            .json()
            .await
            .map_err(|e| StorageError::Decode(e.to_string()))?;

        info!("Objects removed: {:?}", paths);
        Ok(removed)
    }
}

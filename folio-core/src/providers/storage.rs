use async_trait::async_trait;
use folio_model::Bucket;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, warn};

use super::{BackendEndpoint, ObjectStorage, error_message};
use crate::error::{ContentError, Result};

/// Object storage on the hosted backend (`/storage/v1`).
#[derive(Debug, Clone)]
pub struct HostedStorage {
    backend: BackendEndpoint,
    client: reqwest::Client,
}

impl HostedStorage {
    pub fn new(backend: BackendEndpoint, client: reqwest::Client) -> Self {
        Self { backend, client }
    }
}

#[async_trait]
impl ObjectStorage for HostedStorage {
    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<()> {
        let url = self
            .backend
            .endpoint(&["storage", "v1", "object", bucket.name(), name])?;
        debug!(%url, size = bytes.len(), "uploading object");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.backend.service_key))
            .header("apikey", &self.backend.service_key)
            .header(
                CONTENT_TYPE,
                content_type.unwrap_or("application/octet-stream"),
            )
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response).await;
            warn!(%status, bucket = bucket.name(), name, "storage rejected upload: {message}");
            return Err(ContentError::Storage(message));
        }
        Ok(())
    }

    fn public_url(&self, bucket: Bucket, name: &str) -> String {
        self.backend
            .endpoint(&["storage", "v1", "object", "public", bucket.name(), name])
            .map(String::from)
            .unwrap_or_default()
    }
}

//! Clients for the hosted backend's storage and auth REST APIs.

mod auth;
mod storage;

pub use auth::HostedAuth;
pub use storage::HostedStorage;

use std::time::Duration;

use async_trait::async_trait;
use folio_model::Bucket;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::error::{ContentError, Result};

/// Where the hosted backend lives and the keys it expects.
#[derive(Debug, Clone)]
pub struct BackendEndpoint {
    pub url: Url,
    /// Public key sent as `apikey` on auth calls.
    pub anon_key: String,
    /// Privileged key used for storage writes.
    pub service_key: String,
}

impl BackendEndpoint {
    /// Joins `segments` onto the backend URL, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ContentError::Internal(format!("backend url {} cannot be a base", self.url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ContentError::Internal(format!("Failed to create HTTP client: {e}")))
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: Bucket,
        name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<()>;

    /// Public URL for an uploaded object. Empty when the backend has no
    /// public address for it.
    fn public_url(&self, bucket: Bucket, name: &str) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: AuthUser,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Resolves a session token. `Ok(None)` means the token is not valid.
    async fn user_for_token(&self, token: &str) -> Result<Option<AuthUser>>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    async fn sign_out(&self, token: &str) -> Result<()>;
}

/// Error payloads differ between the backend's services; take whichever
/// message field is present.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

pub(crate) async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
    body.message
        .or(body.msg)
        .or(body.error_description)
        .or(body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(url: &str) -> BackendEndpoint {
        BackendEndpoint {
            url: Url::parse(url).unwrap(),
            anon_key: "anon".into(),
            service_key: "service".into(),
        }
    }

    #[test]
    fn endpoint_appends_encoded_segments() {
        let url = backend("https://abc.backend.example/")
            .endpoint(&["storage", "v1", "object", "projects", "a b.png"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://abc.backend.example/storage/v1/object/projects/a%20b.png"
        );
    }

    #[test]
    fn endpoint_handles_urls_without_trailing_slash() {
        let url = backend("https://abc.backend.example")
            .endpoint(&["auth", "v1", "user"])
            .unwrap();
        assert_eq!(url.as_str(), "https://abc.backend.example/auth/v1/user");
    }
}

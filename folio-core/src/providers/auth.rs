use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, warn};

use super::{AuthGateway, AuthSession, AuthUser, BackendEndpoint, error_message};
use crate::error::{ContentError, Result};

/// Session checks against the hosted auth service (`/auth/v1`).
#[derive(Debug, Clone)]
pub struct HostedAuth {
    backend: BackendEndpoint,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

impl HostedAuth {
    pub fn new(backend: BackendEndpoint, client: reqwest::Client) -> Self {
        Self { backend, client }
    }
}

#[async_trait]
impl AuthGateway for HostedAuth {
    async fn user_for_token(&self, token: &str) -> Result<Option<AuthUser>> {
        let url = self.backend.endpoint(&["auth", "v1", "user"])?;
        let response = self
            .client
            .get(url)
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ContentError::Auth(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let user = response
                    .json::<AuthUser>()
                    .await
                    .map_err(|e| ContentError::Auth(e.to_string()))?;
                Ok(Some(user))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("session token rejected");
                Ok(None)
            }
            status => {
                let message = error_message(response).await;
                warn!(%status, "auth service error while resolving session: {message}");
                Err(ContentError::Auth(message))
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let mut url = self.backend.endpoint(&["auth", "v1", "token"])?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let response = self
            .client
            .post(url)
            .header("apikey", &self.backend.anon_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|e| ContentError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ContentError::Auth(error_message(response).await));
        }
        response
            .json::<AuthSession>()
            .await
            .map_err(|e| ContentError::Auth(e.to_string()))
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        let url = self.backend.endpoint(&["auth", "v1", "logout"])?;
        let response = self
            .client
            .post(url)
            .header("apikey", &self.backend.anon_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ContentError::Auth(e.to_string()))?;

        // An already-expired session is as good as signed out.
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }
        Err(ContentError::Auth(error_message(response).await))
    }
}

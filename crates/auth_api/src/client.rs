use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{parse_rejection, AuthApiError};

/// Default base URL for a locally served auth backend.
pub const DEFAULT_AUTH_BASE_URL: &str = "http://127.0.0.1:3000/api";

pub fn register_url(base: &str) -> String {
    format!("{}/auth/register", normalize(base))
}

pub fn login_url(base: &str) -> String {
    format!("{}/auth/login", normalize(base))
}

fn normalize(base: &str) -> &str {
    let trimmed = base.trim();
    if trimmed.is_empty() {
        DEFAULT_AUTH_BASE_URL
    } else {
        trimmed.trim_end_matches('/')
    }
}

/// Transport configuration for auth requests.
#[derive(Debug, Clone)]
pub struct AuthApiConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for AuthApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl AuthApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[derive(Debug, Serialize)]
struct CredentialRequest<'a> {
    identifier: &'a str,
    secret: &'a str,
}

/// Opaque credential returned by a successful register or login call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialGrant {
    pub token: String,
}

/// HTTP client for the registration/login endpoints.
///
/// Requests are never retried: registration is not idempotent and a
/// duplicate submission could double-register an identifier.
#[derive(Debug)]
pub struct AuthApiClient {
    http: Client,
    config: AuthApiConfig,
}

impl AuthApiClient {
    pub fn new(config: AuthApiConfig) -> Result<Self, AuthApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AuthApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AuthApiConfig {
        &self.config
    }

    pub fn build_register_request(
        &self,
        identifier: &str,
        secret: &str,
    ) -> reqwest::RequestBuilder {
        self.http
            .post(register_url(&self.config.base_url))
            .json(&CredentialRequest { identifier, secret })
    }

    pub fn build_login_request(&self, identifier: &str, secret: &str) -> reqwest::RequestBuilder {
        self.http
            .post(login_url(&self.config.base_url))
            .json(&CredentialRequest { identifier, secret })
    }

    /// Create an account; expects `201 {token}`.
    pub async fn register(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<CredentialGrant, AuthApiError> {
        let response = self.build_register_request(identifier, secret).send().await?;
        Self::grant_from_response(response).await
    }

    /// Exchange existing credentials for a token; expects `200 {token}`.
    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<CredentialGrant, AuthApiError> {
        let response = self.build_login_request(identifier, secret).send().await?;
        Self::grant_from_response(response).await
    }

    async fn grant_from_response(
        response: reqwest::Response,
    ) -> Result<CredentialGrant, AuthApiError> {
        let status = response.status();
        let body = response.text().await.map_err(AuthApiError::from)?;

        if !status.is_success() {
            let message = parse_rejection(status, &body);
            tracing::debug!(status = status.as_u16(), %body, "auth request rejected");
            return Err(AuthApiError::Rejected { status, message });
        }

        serde_json::from_str::<CredentialGrant>(&body).map_err(AuthApiError::from)
    }
}

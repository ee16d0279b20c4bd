//! TeamServer API client implementation

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client as HttpClient, StatusCode};

use super::{Organizations, TeamServerApi};
use crate::error::{ApiError, Result};
use crate::profile::Credentials;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the default-organizations endpoint, relative to the REST URL
const DEFAULT_ORGS_PATH: &str = "/ng/profile/organizations/default";

/// reqwest-backed TeamServer client.
///
/// The client carries no credentials of its own; every call authenticates
/// with the credentials it is given.
pub struct TeamServerClient {
    http: HttpClient,
}

impl TeamServerClient {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("tsprof/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { http })
    }

    /// Value of the `Authorization` header: base64 of `username:service_key`
    fn authorization(credentials: &Credentials) -> String {
        general_purpose::STANDARD.encode(format!(
            "{}:{}",
            credentials.username, credentials.service_key
        ))
    }

    fn endpoint(team_server_url: &str, path: &str) -> String {
        format!("{}{}", team_server_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TeamServerApi for TeamServerClient {
    async fn default_organizations(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Organizations>> {
        let url = Self::endpoint(&credentials.team_server_url, DEFAULT_ORGS_PATH);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", Self::authorization(credentials))
            .header("API-Key", credentials.api_key.as_str())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        log::debug!("TeamServer responded {}", status);

        match status {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to read response: {}", e))
                })?;
                if body.trim().is_empty() {
                    return Ok(None);
                }

                let orgs: Option<Organizations> = serde_json::from_str(&body).map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(orgs)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(url).into()),
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

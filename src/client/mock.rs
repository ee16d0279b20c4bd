//! Mock TeamServer API client for testing
//!
//! Returns a configured response without touching the network and counts
//! how many calls were made, so tests can assert that no request was issued.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Organization, Organizations, TeamServerApi};
use crate::error::{ApiError, Result};
use crate::profile::Credentials;

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockTeamServerClient::new().with_orgs(vec![org("Acme")]);
/// let orgs = mock.default_organizations(&creds).await?;
/// assert_eq!(mock.call_count(), 1);
/// ```
#[derive(Default)]
pub struct MockTeamServerClient {
    /// Response body to return; `None` simulates an empty body
    response: Arc<Mutex<Option<Organizations>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Number of calls made
    calls: AtomicUsize,
    /// Credentials seen by each call
    captured: Arc<Mutex<Vec<Credentials>>>,
}

impl MockTeamServerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with these organizations
    pub fn with_orgs(self, orgs: Vec<Organization>) -> Self {
        self.with_response(Some(Organizations::from_list(orgs)))
    }

    /// Respond with an arbitrary (possibly absent) body
    pub fn with_response(self, response: Option<Organizations>) -> Self {
        Self {
            response: Arc::new(Mutex::new(response)),
            ..self
        }
    }

    /// Fail the next call with `error`
    pub fn with_error(self, error: ApiError) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
            ..self
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn captured_credentials(&self) -> Vec<Credentials> {
        self.captured.lock().await.clone()
    }
}

#[async_trait]
impl TeamServerApi for MockTeamServerClient {
    async fn default_organizations(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Organizations>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.captured.lock().await.push(credentials.clone());

        if let Some(error) = self.error.lock().await.take() {
            return Err(error.into());
        }

        Ok(self.response.lock().await.clone())
    }
}

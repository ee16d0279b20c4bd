//! TeamServer API client
//!
//! Only one remote operation is needed: fetching the default organizations
//! visible to a set of credentials. A successful response naming at least one
//! organization is taken as proof that the credentials are valid.

use async_trait::async_trait;

use crate::error::Result;
use crate::profile::Credentials;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod teamserver;

#[cfg(test)]
pub use mock::MockTeamServerClient;
pub use models::{Organization, Organizations};
pub use teamserver::TeamServerClient;

/// TeamServer API client trait
#[async_trait]
pub trait TeamServerApi: Send + Sync {
    /// Fetch the default organizations for the user behind `credentials`.
    ///
    /// `Ok(None)` means the server answered without a body.
    /// Rejected credentials surface as [`crate::error::ApiError::Unauthorized`].
    async fn default_organizations(&self, credentials: &Credentials)
    -> Result<Option<Organizations>>;
}

//! TeamServer connection test

use std::fmt;

use serde::Serialize;

use crate::client::TeamServerApi;
use crate::error::{ApiError, Error, Result};
use crate::profile::{Credentials, TEAMSERVER_URL_SUFFIX};

const MSG_PREFIX: &str = "TeamServer Connection error: ";

/// Outcome of a connection test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum ConnectionOutcome {
    /// Credentials were accepted and an organization was found
    Ok(String),
    /// A required field is missing or malformed; nothing was sent
    ValidationError(String),
    /// TeamServer was reached but rejected the credentials or had no organization
    ConnectionError(String),
}

impl ConnectionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ConnectionOutcome::Ok(_))
    }

    pub fn message(&self) -> &str {
        match self {
            ConnectionOutcome::Ok(msg)
            | ConnectionOutcome::ValidationError(msg)
            | ConnectionOutcome::ConnectionError(msg) => msg,
        }
    }

    fn validation(detail: &str) -> Self {
        ConnectionOutcome::ValidationError(format!("{}{}", MSG_PREFIX, detail))
    }

    fn connection(detail: &str) -> Self {
        ConnectionOutcome::ConnectionError(format!("{}{}", MSG_PREFIX, detail))
    }
}

impl fmt::Display for ConnectionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Run the local checks only.
///
/// Presence is checked in the order username, API key, service key, URL;
/// the first missing field decides the message. The URL suffix is checked
/// last.
pub fn check_credentials(credentials: &Credentials) -> Option<ConnectionOutcome> {
    let required = [
        (&credentials.username, "Username cannot be empty."),
        (&credentials.api_key, "Api Key cannot be empty."),
        (&credentials.service_key, "Service Key cannot be empty."),
        (
            &credentials.team_server_url,
            "TeamServer URL cannot be empty.",
        ),
    ];

    if let Some((_, detail)) = required.iter().find(|(value, _)| value.is_empty()) {
        return Some(ConnectionOutcome::validation(detail));
    }

    if !credentials.team_server_url.ends_with(TEAMSERVER_URL_SUFFIX) {
        return Some(ConnectionOutcome::validation(
            "TeamServer URL does not end with /Contrast/api.",
        ));
    }

    None
}

/// Checks candidate credentials locally, then against TeamServer
pub struct ConnectionValidator<C> {
    client: C,
}

impl<C: TeamServerApi> ConnectionValidator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Test `credentials`.
    ///
    /// Local failures short-circuit before any request. Otherwise exactly one
    /// request is made; rejected credentials and organization-less answers
    /// become [`ConnectionOutcome::ConnectionError`]. Any other failure is
    /// returned as `Err`.
    pub async fn test(&self, credentials: &Credentials) -> Result<ConnectionOutcome> {
        if let Some(outcome) = check_credentials(credentials) {
            log::debug!("Connection test rejected locally: {}", outcome);
            return Ok(outcome);
        }

        match self.client.default_organizations(credentials).await {
            Ok(Some(orgs)) if !orgs.is_empty() => {
                log::info!(
                    "Verified TeamServer credentials ({} organization(s))",
                    orgs.all().len()
                );
                Ok(ConnectionOutcome::Ok(
                    "Successfully verified the connection to TeamServer!".to_string(),
                ))
            }
            Ok(_) => Ok(ConnectionOutcome::connection(
                "No organization found, Check your credentials and URL.",
            )),
            Err(Error::Api(ApiError::Unauthorized)) => {
                log::debug!("TeamServer rejected the supplied credentials");
                Ok(ConnectionOutcome::connection("Unable to connect to TeamServer."))
            }
            Err(err) => Err(err),
        }
    }
}

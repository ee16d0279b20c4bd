//! Profile field validation
//!
//! Per-field presence checks used by the configuration form, plus the
//! connection test in [`connection`].

use std::fmt;

use serde::Serialize;

use crate::profile::Profile;

pub mod connection;

pub use connection::{ConnectionOutcome, ConnectionValidator, check_credentials};

/// A profile form field with a presence check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ProfileName,
    Username,
    ApiKey,
    ServiceKey,
    OrgUuid,
    TeamServerUrl,
    ApplicationName,
}

impl Field {
    /// Every field, in form order
    pub const ALL: [Field; 7] = [
        Field::ProfileName,
        Field::Username,
        Field::ApiKey,
        Field::ServiceKey,
        Field::TeamServerUrl,
        Field::OrgUuid,
        Field::ApplicationName,
    ];

    /// Message shown when the field is left empty
    pub fn missing_message(&self) -> &'static str {
        match self {
            Field::Username => "Please set a username.",
            Field::ProfileName => "Please set a profile name.",
            Field::ApiKey => "Please set an API Key.",
            Field::ServiceKey => "Please set a Service Key.",
            Field::OrgUuid => "Please set an Organization Uuid.",
            Field::TeamServerUrl => "Please set a TeamServer Url.",
            Field::ApplicationName => "Please set an Application Name.",
        }
    }

    /// Reject a zero-length value
    pub fn check(&self, value: &str) -> FieldCheck {
        if value.is_empty() {
            FieldCheck::Missing(*self)
        } else {
            FieldCheck::Ok
        }
    }

    /// The value of this field in `profile`
    pub fn value_in<'a>(&self, profile: &'a Profile) -> &'a str {
        match self {
            Field::ProfileName => &profile.name,
            Field::Username => &profile.username,
            Field::ApiKey => &profile.api_key,
            Field::ServiceKey => &profile.service_key,
            Field::OrgUuid => &profile.org_uuid,
            Field::TeamServerUrl => &profile.team_server_url,
            Field::ApplicationName => &profile.application_name,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::ProfileName => "Profile name",
            Field::Username => "Username",
            Field::ApiKey => "API key",
            Field::ServiceKey => "Service key",
            Field::OrgUuid => "Organization UUID",
            Field::TeamServerUrl => "TeamServer URL",
            Field::ApplicationName => "Application name",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a single field check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    Ok,
    Missing(Field),
}

impl FieldCheck {
    pub fn is_ok(&self) -> bool {
        matches!(self, FieldCheck::Ok)
    }

    /// Error message, if the check failed
    pub fn message(&self) -> Option<&'static str> {
        match self {
            FieldCheck::Ok => None,
            FieldCheck::Missing(field) => Some(field.missing_message()),
        }
    }
}

/// Run every field check over `profile`, returning the failures in form order
pub fn check_profile(profile: &Profile) -> Vec<FieldCheck> {
    Field::ALL
        .iter()
        .map(|field| field.check(field.value_in(profile)))
        .filter(|check| !check.is_ok())
        .collect()
}

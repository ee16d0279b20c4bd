//! TeamServer connection profiles
//!
//! A [`Profile`] is a named bundle of credentials and target identifiers.
//! Profiles live in a [`ProfileRegistry`], are persisted by a [`ProfileStore`],
//! and arrive from the form layer as a [`ProfileSubmission`].

use std::fmt;

use serde::{Deserialize, Serialize};

mod registry;
mod selection;
mod store;

pub use registry::ProfileRegistry;
pub use selection::ProfileSelection;
pub use store::{ProfileStore, ProfileSubmission};

/// Path suffix every TeamServer REST URL must carry
pub const TEAMSERVER_URL_SUFFIX: &str = "/Contrast/api";

/// A named TeamServer connection profile.
///
/// Fields are not validated on construction or deserialization; missing
/// string fields become empty strings. Validation is a separate step, see
/// [`crate::validation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Profile name, used as the lookup key
    pub name: String,

    /// TeamServer username
    pub username: String,

    /// TeamServer API key
    pub api_key: String,

    /// TeamServer service key
    pub service_key: String,

    /// TeamServer REST URL, e.g. `https://host/Contrast/api`
    pub team_server_url: String,

    /// Organization UUID
    pub org_uuid: String,

    /// Application name the profile reports on
    pub application_name: String,

    /// Vulnerability types to track, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub vulnerability_types: Vec<VulnerabilityType>,
}

impl Profile {
    /// Copy out the four fields needed for a connection test
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            api_key: self.api_key.clone(),
            service_key: self.service_key.clone(),
            team_server_url: self.team_server_url.clone(),
        }
    }
}

/// Credentials submitted to the connection test
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
    pub service_key: String,
    pub team_server_url: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        api_key: impl Into<String>,
        service_key: impl Into<String>,
        team_server_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            service_key: service_key.into(),
            team_server_url: team_server_url.into(),
        }
    }
}

/// Vulnerability rule tags a profile can track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VulnerabilityType {
    SqlInjection,
    HqlInjection,
    NosqlInjection,
    LdapInjection,
    XpathInjection,
    CmdInjection,
    HeaderInjection,
    ReflectedXss,
    StoredXss,
    PathTraversal,
    Xxe,
    UnvalidatedRedirect,
    UntrustedDeserialization,
    TrustBoundaryViolation,
    CryptoBadMac,
    CryptoBadCiphers,
    CryptoWeakRandomness,
    Csrf,
    SecureFlagMissing,
    ClickjackingControlMissing,
}

impl VulnerabilityType {
    /// Wire name of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            VulnerabilityType::SqlInjection => "sql-injection",
            VulnerabilityType::HqlInjection => "hql-injection",
            VulnerabilityType::NosqlInjection => "nosql-injection",
            VulnerabilityType::LdapInjection => "ldap-injection",
            VulnerabilityType::XpathInjection => "xpath-injection",
            VulnerabilityType::CmdInjection => "cmd-injection",
            VulnerabilityType::HeaderInjection => "header-injection",
            VulnerabilityType::ReflectedXss => "reflected-xss",
            VulnerabilityType::StoredXss => "stored-xss",
            VulnerabilityType::PathTraversal => "path-traversal",
            VulnerabilityType::Xxe => "xxe",
            VulnerabilityType::UnvalidatedRedirect => "unvalidated-redirect",
            VulnerabilityType::UntrustedDeserialization => "untrusted-deserialization",
            VulnerabilityType::TrustBoundaryViolation => "trust-boundary-violation",
            VulnerabilityType::CryptoBadMac => "crypto-bad-mac",
            VulnerabilityType::CryptoBadCiphers => "crypto-bad-ciphers",
            VulnerabilityType::CryptoWeakRandomness => "crypto-weak-randomness",
            VulnerabilityType::Csrf => "csrf",
            VulnerabilityType::SecureFlagMissing => "secure-flag-missing",
            VulnerabilityType::ClickjackingControlMissing => "clickjacking-control-missing",
        }
    }
}

impl fmt::Display for VulnerabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(name: &str) -> Profile {
    Profile {
        name: name.to_string(),
        username: "alice".to_string(),
        api_key: "api-key".to_string(),
        service_key: "service-key".to_string(),
        team_server_url: "https://ts.example.com/Contrast/api".to_string(),
        org_uuid: "00000000-1111-2222-3333-444444444444".to_string(),
        application_name: "webgoat".to_string(),
        vulnerability_types: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_camel_case_fields() {
        let json = r#"{
            "name": "prod",
            "username": "alice",
            "apiKey": "k",
            "serviceKey": "s",
            "teamServerUrl": "https://ts/Contrast/api",
            "orgUuid": "org",
            "applicationName": "app",
            "vulnerabilityTypes": ["sql-injection", "reflected-xss"]
        }"#;

        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.name, "prod");
        assert_eq!(profile.api_key, "k");
        assert_eq!(profile.service_key, "s");
        assert_eq!(profile.team_server_url, "https://ts/Contrast/api");
        assert_eq!(
            profile.vulnerability_types,
            vec![VulnerabilityType::SqlInjection, VulnerabilityType::ReflectedXss]
        );
    }

    #[test]
    fn test_profile_missing_fields_default_to_empty() {
        let profile: Profile = serde_json::from_str(r#"{"name": "partial"}"#).unwrap();

        assert_eq!(profile.name, "partial");
        assert!(profile.username.is_empty());
        assert!(profile.team_server_url.is_empty());
        assert!(profile.vulnerability_types.is_empty());
    }

    #[test]
    fn test_unknown_vulnerability_type_rejected() {
        let result = serde_json::from_str::<Profile>(r#"{"vulnerabilityTypes": ["not-a-rule"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_vulnerability_type_display_matches_wire_name() {
        for vt in [
            VulnerabilityType::Xxe,
            VulnerabilityType::CryptoBadMac,
            VulnerabilityType::ClickjackingControlMissing,
        ] {
            let wire = serde_json::to_string(&vt).unwrap();
            assert_eq!(wire, format!("\"{}\"", vt));
        }
    }

    #[test]
    fn test_credentials_from_profile() {
        let creds = sample_profile("prod").credentials();
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.api_key, "api-key");
        assert_eq!(creds.service_key, "service-key");
        assert!(creds.team_server_url.ends_with(TEAMSERVER_URL_SUFFIX));
    }
}

//! tsprof - TeamServer connection profiles
//!
//! Stores named TeamServer connection profiles, validates their fields, and
//! verifies credentials against TeamServer.
//!
//! ```ignore
//! let registry = ProfileRegistry::open(ProfileStore::new("profiles.yaml"))?;
//! let profile = registry.get(None).ok_or(ConfigError::NoProfiles)?;
//!
//! let validator = ConnectionValidator::new(TeamServerClient::new()?);
//! let outcome = validator.test(&profile.credentials()).await?;
//! println!("{}", outcome);
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod profile;
pub mod validation;

pub use client::{TeamServerApi, TeamServerClient};
pub use error::{ApiError, ConfigError, Error, Result};
pub use profile::{
    Credentials, Profile, ProfileRegistry, ProfileSelection, ProfileStore, ProfileSubmission,
    VulnerabilityType,
};
pub use validation::{ConnectionOutcome, ConnectionValidator, Field, FieldCheck};

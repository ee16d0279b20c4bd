//! Job-level profile selection

use serde::{Deserialize, Serialize};

use super::{Profile, ProfileRegistry};

/// The profile a job is configured to use.
///
/// An unset name falls back to the registry's first profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_server_profile_name: Option<String>,
}

impl ProfileSelection {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            team_server_profile_name: Some(name.into()),
        }
    }

    pub fn resolve(&self, registry: &ProfileRegistry) -> Option<Profile> {
        registry.get(self.team_server_profile_name.as_deref())
    }
}

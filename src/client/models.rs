//! TeamServer response models

use serde::{Deserialize, Serialize};

/// Organization resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization name
    #[serde(default)]
    pub name: String,

    /// Organization UUID
    #[serde(rename = "organization_uuid", default)]
    pub uuid: String,
}

/// Response of the default-organizations endpoint.
///
/// TeamServer reports the profile's default organization in `organization`
/// and, on some versions, the full list in `organizations`. Either may be
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizations {
    #[serde(default)]
    pub messages: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<Organization>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<Organization>>,
}

impl Organizations {
    /// Build a response listing `orgs`, with the first one as the default
    pub fn from_list(orgs: Vec<Organization>) -> Self {
        Self {
            messages: Vec::new(),
            organization: orgs.first().cloned(),
            organizations: Some(orgs),
        }
    }

    /// All organizations in the response, default first, without duplicates
    pub fn all(&self) -> Vec<&Organization> {
        let mut all: Vec<&Organization> = self.organization.iter().collect();
        for org in self.organizations.iter().flatten() {
            if !all.iter().any(|o| o.uuid == org.uuid && o.name == org.name) {
                all.push(org);
            }
        }
        all
    }

    pub fn is_empty(&self) -> bool {
        self.organization.is_none() && self.organizations.as_ref().is_none_or(|l| l.is_empty())
    }
}

//! Profile persistence and form submissions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Profile;
use crate::error::{ConfigError, Result};

/// On-disk layout of the profile file
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredProfiles {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// YAML-backed storage for the profile list
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default profile file location (`~/.tsprof/profiles.yaml`)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tsprof").join("profiles.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted profiles. A missing file is an empty list.
    pub fn load(&self) -> Result<Vec<Profile>> {
        if !self.path.exists() {
            log::debug!("No profile file at {}", self.path.display());
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let stored: StoredProfiles = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        Ok(stored.profiles)
    }

    /// Overwrite the persisted profiles
    pub fn save(&self, profiles: &[Profile]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let stored = StoredProfiles {
            profiles: profiles.to_vec(),
        };
        let contents =
            serde_yaml::to_string(&stored).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&self.path, contents)?;

        // Secrets are stored in plain text; keep the file private to the owner
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

/// `profile` entry of a submission: a list, or a single profile
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<Profile>),
    One(Box<Profile>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSubmission {
    profile: Option<OneOrMany>,
}

/// A profile list posted by the configuration form.
///
/// The `profile` key may hold an array of profiles, a single profile object,
/// or be missing altogether. A document without a `profile` key resets the
/// registry to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSubmission {
    pub profiles: Vec<Profile>,
}

impl ProfileSubmission {
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawSubmission = serde_json::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("Invalid profile submission: {}", e)))?;
        Ok(raw.into_submission())
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty YAML document is the same as `{}`
        if text.trim().is_empty() {
            return Ok(Self {
                profiles: Vec::new(),
            });
        }

        let raw: RawSubmission = serde_yaml::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("Invalid profile submission: {}", e)))?;
        Ok(raw.into_submission())
    }

    /// Read a submission file, choosing the parser by extension (`.json`, else YAML)
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        }
    }
}

impl RawSubmission {
    fn into_submission(self) -> ProfileSubmission {
        let profiles = match self.profile {
            Some(OneOrMany::Many(profiles)) => profiles,
            Some(OneOrMany::One(profile)) => vec![*profile],
            None => Vec::new(),
        };
        ProfileSubmission { profiles }
    }
}

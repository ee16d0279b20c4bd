//! Configuration management for tsprof

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::profile::ProfileStore;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Location of the profile file (defaults to ~/.tsprof/profiles.yaml)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles_path: Option<PathBuf>,

    /// Timeout for the TeamServer request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profiles_path: None,
            request_timeout_secs: default_timeout_secs(),
            format: None,
        }
    }
}

impl Settings {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".tsprof").join("config.yaml"))
    }

    /// Load settings from `path`, or from the default path when `None`.
    ///
    /// A missing file at the default location yields default settings; a
    /// missing file at an explicit path is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(PathBuf::from(path)),
            None => match Self::load_from(Self::default_path()?) {
                Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
                other => other,
            },
        }
    }

    /// Load settings from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Settings = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        settings.validate()?;
        log::debug!("Loaded settings from {}", path.display());

        Ok(settings)
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(
                ConfigError::Invalid("request_timeout_secs must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Profile store, honoring an override path before the configured one
    pub fn profile_store(&self, override_path: Option<&str>) -> Result<ProfileStore> {
        let path = match (override_path, &self.profiles_path) {
            (Some(path), _) => PathBuf::from(path),
            (None, Some(path)) => path.clone(),
            (None, None) => ProfileStore::default_path()?,
        };
        Ok(ProfileStore::new(path))
    }
}

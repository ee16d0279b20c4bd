//! Command execution context
//!
//! Loads settings and opens the profile registry once, so handlers receive a
//! ready-to-use registry instead of reaching for global state.

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::TeamServerClient;
use crate::config::Settings;
use crate::error::Result;
use crate::profile::{ProfileRegistry, ProfileStore};

/// Context for command execution
pub struct CommandContext {
    /// Loaded settings
    pub settings: Settings,
    /// Registry backed by the resolved profile file
    pub registry: ProfileRegistry,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load settings and open the registry
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        Self::build(opts, ProfileRegistry::open)
    }

    /// Load settings with a registry that skips reading the current profile
    /// file, for commands that overwrite every profile
    pub fn for_replacement(opts: &GlobalOptions) -> Result<Self> {
        Self::build(opts, |store| Ok(ProfileRegistry::for_replacement(store)))
    }

    fn build(
        opts: &GlobalOptions,
        open: impl FnOnce(ProfileStore) -> Result<ProfileRegistry>,
    ) -> Result<Self> {
        let settings = Settings::load_at(opts.config_ref())?;
        let store = settings.profile_store(opts.profiles_ref())?;
        let registry = open(store)?;
        let format = resolve_format(opts, &settings);

        Ok(Self {
            settings,
            registry,
            format,
        })
    }

    /// TeamServer client honoring the configured timeout
    pub fn client(&self) -> Result<TeamServerClient> {
        TeamServerClient::with_timeout(self.settings.request_timeout())
    }
}

/// The `--format` flag, else the settings file, else the default
pub fn resolve_format(opts: &GlobalOptions, settings: &Settings) -> OutputFormat {
    opts.format
        .or_else(|| settings.format.as_deref().and_then(OutputFormat::from_name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_context_uses_settings_format_when_flag_absent() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config.yaml");
        let profiles = temp.path().join("profiles.yaml");
        std::fs::write(&config, "format: json\n").unwrap();

        let opts = GlobalOptions {
            format: None,
            config: Some(config.to_string_lossy().to_string()),
            profiles: Some(profiles.to_string_lossy().to_string()),
        };
        let ctx = CommandContext::new(&opts).unwrap();

        assert_eq!(ctx.format, OutputFormat::Json);
        assert!(ctx.registry.is_empty());
    }

    #[test]
    fn test_context_flag_beats_settings_format() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config.yaml");
        std::fs::write(&config, "format: json\n").unwrap();

        let opts = GlobalOptions {
            format: Some(OutputFormat::Table),
            config: Some(config.to_string_lossy().to_string()),
            profiles: Some(temp.path().join("p.yaml").to_string_lossy().to_string()),
        };

        assert_eq!(CommandContext::new(&opts).unwrap().format, OutputFormat::Table);
    }

    #[test]
    fn test_for_replacement_skips_corrupt_profile_file() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config.yaml");
        let profiles = temp.path().join("profiles.yaml");
        std::fs::write(&config, "").unwrap();
        std::fs::write(&profiles, "profiles:\n  - vulnerabilityTypes: [not-a-rule]\n").unwrap();

        let opts = GlobalOptions {
            format: None,
            config: Some(config.to_string_lossy().to_string()),
            profiles: Some(profiles.to_string_lossy().to_string()),
        };

        assert!(CommandContext::new(&opts).is_err());
        assert!(CommandContext::for_replacement(&opts).unwrap().registry.is_empty());
    }

    #[test]
    fn test_resolve_format_falls_back_to_settings() {
        let settings = Settings {
            format: Some("json".to_string()),
            ..Settings::default()
        };

        assert_eq!(resolve_format(&GlobalOptions::default(), &settings), OutputFormat::Json);
        assert_eq!(
            resolve_format(&GlobalOptions::default(), &Settings::default()),
            OutputFormat::Pretty
        );
    }
}

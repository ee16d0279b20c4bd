//! Profile command implementations

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use serde::Serialize;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::error::{ConfigError, Result};
use crate::output::json::format_json;
use crate::output::table::format_details;
use crate::output::{mask_secret, render_rows};
use crate::profile::{Profile, ProfileSubmission};

/// Display model for profile list output
#[derive(Debug, Clone, Serialize, tabled::Tabled)]
pub struct ProfileListItem {
    #[tabled(rename = "")]
    #[serde(rename = "default")]
    pub is_default: String,
    #[tabled(rename = "PROFILE")]
    pub name: String,
    #[tabled(rename = "USERNAME")]
    pub username: String,
    #[tabled(rename = "TEAMSERVER URL")]
    pub team_server_url: String,
    #[tabled(rename = "ORG UUID")]
    pub org_uuid: String,
    #[tabled(rename = "APPLICATION")]
    pub application_name: String,
}

impl ProfileListItem {
    fn new(profile: &Profile, is_default: bool) -> Self {
        Self {
            is_default: if is_default { "*" } else { "" }.to_string(),
            name: profile.name.clone(),
            username: profile.username.clone(),
            team_server_url: profile.team_server_url.clone(),
            org_uuid: profile.org_uuid.clone(),
            application_name: profile.application_name.clone(),
        }
    }
}

/// Profile with secrets masked, for `profile show`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileView {
    name: String,
    username: String,
    api_key: String,
    service_key: String,
    team_server_url: String,
    org_uuid: String,
    application_name: String,
    vulnerability_types: Vec<String>,
}

impl From<&Profile> for ProfileView {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            username: profile.username.clone(),
            api_key: mask_secret(&profile.api_key),
            service_key: mask_secret(&profile.service_key),
            team_server_url: profile.team_server_url.clone(),
            org_uuid: profile.org_uuid.clone(),
            application_name: profile.application_name.clone(),
            vulnerability_types: profile
                .vulnerability_types
                .iter()
                .map(|vt| vt.to_string())
                .collect(),
        }
    }
}

/// List all profiles. The first one, used when no name is given, is marked.
pub fn list(opts: &GlobalOptions) -> Result<ExitCode> {
    let ctx = CommandContext::new(opts)?;

    let items: Vec<ProfileListItem> = ctx
        .registry
        .get_all()
        .iter()
        .enumerate()
        .map(|(idx, profile)| ProfileListItem::new(profile, idx == 0))
        .collect();

    println!("{}", render_rows(&items, ctx.format)?);

    if ctx.format == OutputFormat::Pretty && !items.is_empty() {
        println!(
            "\n{} Profiles marked * are used when no profile name is given.",
            "→".cyan()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show one profile, falling back to the first when no name is given
pub fn show(name: Option<&str>, opts: &GlobalOptions) -> Result<ExitCode> {
    let ctx = CommandContext::new(opts)?;
    let profile = resolve(&ctx, name)?;
    let view = ProfileView::from(&profile);

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&view)?),
        _ => {
            println!("{} {}", "Profile:".bold(), view.name.bold());
            println!();
            let vulnerability_types = if view.vulnerability_types.is_empty() {
                "-".to_string()
            } else {
                view.vulnerability_types.join(", ")
            };
            println!(
                "{}",
                format_details(&[
                    ("Username", view.username),
                    ("API key", view.api_key),
                    ("Service key", view.service_key),
                    ("TeamServer URL", view.team_server_url),
                    ("Organization UUID", view.org_uuid),
                    ("Application", view.application_name),
                    ("Vulnerability types", vulnerability_types),
                ])
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Replace every profile with the contents of a submission file
pub fn replace(file: &Path, opts: &GlobalOptions) -> Result<ExitCode> {
    let ctx = CommandContext::for_replacement(opts)?;
    let submission = ProfileSubmission::from_path(file)?;
    let count = submission.profiles.len();

    ctx.registry.replace_all(submission.profiles)?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&ctx.registry.names())?),
        _ => println!("{} Saved {} profile(s)", "✓".green(), count),
    }

    Ok(ExitCode::SUCCESS)
}

/// Remove every profile
pub fn clear(opts: &GlobalOptions) -> Result<ExitCode> {
    let ctx = CommandContext::for_replacement(opts)?;
    ctx.registry.replace_all(Vec::new())?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&ctx.registry.names())?),
        _ => println!("{} Removed all profiles", "✓".green()),
    }

    Ok(ExitCode::SUCCESS)
}

/// Look up a profile, turning absence into a user-facing error
pub(crate) fn resolve(ctx: &CommandContext, name: Option<&str>) -> Result<Profile> {
    ctx.registry.get(name).ok_or_else(|| match name {
        Some(name) => ConfigError::ProfileNotFound(name.to_string()).into(),
        None => ConfigError::NoProfiles.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{VulnerabilityType, sample_profile};

    #[test]
    fn test_view_masks_secrets() {
        let mut profile = sample_profile("prod");
        profile.api_key = "0123456789abcdef".to_string();
        profile.vulnerability_types = vec![VulnerabilityType::Xxe];

        let view = ProfileView::from(&profile);

        assert_eq!(view.api_key, "0123...cdef");
        assert_eq!(view.service_key, "serv...-key");
        assert_eq!(view.vulnerability_types, vec!["xxe".to_string()]);
    }

    #[test]
    fn test_list_item_marks_default() {
        let item = ProfileListItem::new(&sample_profile("prod"), true);
        assert_eq!(item.is_default, "*");

        let item = ProfileListItem::new(&sample_profile("other"), false);
        assert!(item.is_default.is_empty());
    }
}

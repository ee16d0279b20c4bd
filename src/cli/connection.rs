//! Connection test command implementation

use std::process::ExitCode;

use colored::Colorize;

use crate::cli::profile::resolve;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat, TestConnectionArgs};
use crate::error::Result;
use crate::output::json::format_json;
use crate::profile::Credentials;
use crate::validation::{ConnectionOutcome, ConnectionValidator};

/// Test credentials against TeamServer and report the outcome
pub async fn test(args: TestConnectionArgs, opts: &GlobalOptions) -> Result<ExitCode> {
    let ctx = CommandContext::new(opts)?;
    let credentials = credentials_for(&ctx, args)?;

    let validator = ConnectionValidator::new(ctx.client()?);
    let outcome = validator.test(&credentials).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&outcome)?),
        _ => match &outcome {
            ConnectionOutcome::Ok(msg) => println!("{} {}", "✓".green(), msg),
            ConnectionOutcome::ValidationError(msg) | ConnectionOutcome::ConnectionError(msg) => {
                println!("{} {}", "✗".red(), msg)
            }
        },
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Start from the named profile (if any), then apply explicit flags
fn credentials_for(ctx: &CommandContext, args: TestConnectionArgs) -> Result<Credentials> {
    let base = match args.profile.as_deref() {
        Some(name) => resolve(ctx, Some(name))?.credentials(),
        None => Credentials::default(),
    };

    Ok(Credentials {
        username: args.username.unwrap_or(base.username),
        api_key: args.api_key.unwrap_or(base.api_key),
        service_key: args.service_key.unwrap_or(base.service_key),
        team_server_url: args.url.unwrap_or(base.team_server_url),
    })
}

//! Field check command implementations

use std::process::ExitCode;

use colored::Colorize;
use serde::Serialize;

use crate::cli::profile::resolve;
use crate::cli::context::resolve_format;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::config::Settings;
use crate::error::Result;
use crate::output::json::format_json;
use crate::validation::{Field, FieldCheck, check_profile};

#[derive(Debug, Serialize)]
struct FieldReport {
    field: Field,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl FieldReport {
    fn new(field: Field, check: FieldCheck) -> Self {
        Self {
            field,
            ok: check.is_ok(),
            message: check.message(),
        }
    }
}

/// Check one field value, as the form does on every keystroke
pub fn field(field: Field, value: &str, opts: &GlobalOptions) -> Result<ExitCode> {
    let settings = Settings::load_at(opts.config_ref())?;
    let check = field.check(value);
    let report = FieldReport::new(field, check);

    match resolve_format(opts, &settings) {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        _ => print_report(&report),
    }

    Ok(exit_code(check.is_ok()))
}

/// Run every field check over a stored profile
pub fn profile(name: Option<&str>, opts: &GlobalOptions) -> Result<ExitCode> {
    let ctx = CommandContext::new(opts)?;
    let profile = resolve(&ctx, name)?;
    let failures = check_profile(&profile);

    let reports: Vec<FieldReport> = Field::ALL
        .iter()
        .map(|field| {
            let check = failures
                .iter()
                .copied()
                .find(|check| *check == FieldCheck::Missing(*field))
                .unwrap_or(FieldCheck::Ok);
            FieldReport::new(*field, check)
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&reports)?),
        _ => {
            let label = if profile.name.is_empty() {
                "(unnamed)".to_string()
            } else {
                profile.name.clone()
            };
            println!("{} {}\n", "Checking profile:".bold(), label.bold());
            for report in &reports {
                print_report(report);
            }
        }
    }

    Ok(exit_code(failures.is_empty()))
}

fn print_report(report: &FieldReport) {
    match report.message {
        None => println!("{} {}", "✓".green(), report.field),
        Some(msg) => println!("{} {}: {}", "✗".red(), report.field, msg),
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

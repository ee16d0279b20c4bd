//! CLI command definitions and handlers

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod check;
pub mod connection;
pub mod context;
pub mod profile;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::error::Result;
use crate::validation::Field;

/// tsprof - manage and verify TeamServer connection profiles
#[derive(Parser, Debug)]
#[command(name = "tsprof")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TSPROF_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override settings file location
    #[arg(long, global = true, env = "TSPROF_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override profile file location
    #[arg(long, global = true, env = "TSPROF_PROFILES", hide_env = true)]
    pub profiles: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TSPROF_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage stored profiles
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Check a single form field value
    Check {
        /// Field to check
        #[arg(value_enum)]
        field: Field,

        /// Value to check (empty when omitted)
        #[arg(default_value = "")]
        value: String,
    },

    /// Verify credentials against TeamServer
    TestConnection(TestConnectionArgs),

    /// Display version information
    Version,
}

/// Profile management subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List configured profiles
    List,

    /// Show a profile (the first one when no name is given)
    Show {
        /// Profile name
        name: Option<String>,
    },

    /// Replace all profiles with those in a submission file
    Replace {
        /// Submission file (.json, or YAML otherwise)
        #[arg(long, short)]
        file: PathBuf,
    },

    /// Remove all profiles
    Clear,

    /// Run the field checks over a profile
    Check {
        /// Profile name (the first profile when omitted)
        name: Option<String>,
    },
}

/// Credentials for `test-connection`.
///
/// Values come from `--profile` when given (otherwise they start empty) and
/// are overridden by any explicit flag.
#[derive(Args, Debug, Default)]
pub struct TestConnectionArgs {
    /// Take credentials from this stored profile
    #[arg(long)]
    pub profile: Option<String>,

    /// TeamServer username
    #[arg(long)]
    pub username: Option<String>,

    /// TeamServer API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// TeamServer service key
    #[arg(long)]
    pub service_key: Option<String>,

    /// TeamServer REST URL (must end with /Contrast/api)
    #[arg(long)]
    pub url: Option<String>,
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Version => {
            println!("tsprof version {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { field, value } => check::field(field, &value, &opts),
        Commands::Profile(cmd) => match cmd {
            ProfileCommands::List => profile::list(&opts),
            ProfileCommands::Show { name } => profile::show(name.as_deref(), &opts),
            ProfileCommands::Replace { file } => profile::replace(&file, &opts),
            ProfileCommands::Clear => profile::clear(&opts),
            ProfileCommands::Check { name } => check::profile(name.as_deref(), &opts),
        },
        Commands::TestConnection(args) => connection::test(args, &opts).await,
    }
}

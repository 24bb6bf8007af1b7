//! Kittycat CLI
//!
//! Resolves the staff permissions from the configuration and answers
//! permission questions about them.

use anyhow::Context;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use kittycat::{
    Permission, PermissionSet,
    config::{AppConfig, LOG_LEVELS, LogFormat, load_config},
    permissions::check_patch,
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Kittycat - resolve and check hierarchical staff permissions
#[derive(Parser, Debug)]
#[command(name = "kittycat")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "KITTYCAT_CONFIG", global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the configured level
    #[arg(
        long,
        env = "KITTYCAT_LOG_LEVEL",
        global = true,
        value_parser = PossibleValuesParser::new(LOG_LEVELS.iter().copied())
    )]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved permissions
    Resolve {
        /// Print a JSON array instead of one permission per line
        #[arg(long)]
        json: bool,
    },
    /// Check whether the resolved permissions grant a permission
    Check {
        /// Permission to check, e.g. `rpc.Claim`
        permission: String,
    },
    /// Check whether the resolved permissions allow changing a permission list
    Patch {
        /// Current permissions, comma separated
        #[arg(long, value_delimiter = ',', default_value = "")]
        current: Vec<String>,
        /// Proposed permissions, comma separated
        #[arg(long, value_delimiter = ',', default_value = "")]
        new: Vec<String>,
    },
    /// Print the canonical form of a permission
    Parse {
        /// Permission string, e.g. `~apps.delete`
        permission: String,
    },
}

/// What a command prints to stdout, and whether it succeeded
#[derive(Debug, PartialEq, Eq)]
struct Outcome {
    lines: Vec<String>,
    success: bool,
}

impl Outcome {
    fn success(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: true,
        }
    }

    fn failure(lines: Vec<String>) -> Self {
        Self {
            lines,
            success: false,
        }
    }

    fn exit_code(&self) -> ExitCode {
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &AppConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Parse a comma separated list, ignoring blank entries
fn parse_list(items: &[String]) -> anyhow::Result<PermissionSet> {
    let items = items.iter().map(|s| s.trim()).filter(|s| !s.is_empty());
    PermissionSet::from_strs(items).context("Invalid permission list")
}

fn parse_permission(permission: &str) -> anyhow::Result<Permission> {
    permission
        .parse()
        .with_context(|| format!("Invalid permission '{}'", permission))
}

/// Run a command against the resolved permissions
fn run(command: &Command, resolved: &PermissionSet) -> anyhow::Result<Outcome> {
    match command {
        Command::Resolve { json } => {
            if *json {
                Ok(Outcome::success(vec![serde_json::to_string(resolved)?]))
            } else {
                Ok(Outcome::success(resolved.to_strings()))
            }
        }
        Command::Check { permission } => {
            let requested = parse_permission(permission)?;

            if resolved.has(&requested) {
                Ok(Outcome::success(vec!["allowed".to_string()]))
            } else {
                Ok(Outcome::failure(vec!["denied".to_string()]))
            }
        }
        Command::Patch { current, new } => {
            let current = parse_list(current)?;
            let new = parse_list(new)?;

            let result = check_patch(resolved.as_slice(), current.as_slice(), new.as_slice());
            match result.message() {
                None => Ok(Outcome::success(vec!["ok".to_string()])),
                Some(message) => {
                    error!(%message, "Patch denied");
                    Ok(Outcome::failure(vec![message]))
                }
            }
        }
        Command::Parse { permission } => {
            let perm = parse_permission(permission)?;
            Ok(Outcome::success(vec![perm.to_string()]))
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    init_logging(&config, args.log_level.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        positions = config.staff.positions.len(),
        "Loaded staff permissions"
    );

    let resolved = config.staff.resolve();
    let outcome = run(&args.command, &resolved)?;

    for line in &outcome.lines {
        println!("{}", line);
    }

    Ok(outcome.exit_code())
}

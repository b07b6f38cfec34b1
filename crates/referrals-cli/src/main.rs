mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use referrals_config as config;
use referrals_core::rules::FraudPolicy;
use referrals_store::{paths, CsvStore, ReferralService};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

use crate::commands::{check, list, serve, Context};
use crate::error::{exit_code_for, report_error};

#[derive(Debug, Parser)]
#[command(name = "referrals", version, about = "referral tracking service")]
struct Cli {
    /// CSV file holding accepted referrals
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the per-referrer referral limit
    #[arg(long, global = true)]
    max_referrals: Option<usize>,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve(serve::ServeArgs),
    /// Run the fraud checks for a pair without storing it
    Check(check::CheckArgs),
    /// Print stored referrals
    List(list::ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose, matches!(cli.command, Command::Serve(_)));
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        max_referrals,
        verbose,
        command,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let policy = match max_referrals {
        Some(max) => FraudPolicy::new(max, app_config.fraud.suspicious_patterns())
            .map_err(|err| error::invalid_input(err.to_string()))?,
        None => app_config.fraud.clone(),
    };

    let db_path = paths::resolve_db_path(db_path.or_else(|| app_config.db_path.clone()))
        .with_context(|| "resolve referral store path")?;
    debug!(path = %db_path.display(), "referral store path resolved");

    let service = ReferralService::new(CsvStore::new(&db_path), policy);
    service
        .initialize()
        .with_context(|| format!("initialize referral store {}", db_path.display()))?;

    let ctx = Context {
        service: Arc::new(service),
        config: &app_config,
    };

    match command {
        Command::Serve(args) => serve::serve(&ctx, args),
        Command::Check(args) => check::check(&ctx, args),
        Command::List(args) => list::list(&ctx, args),
    }
}

fn init_logging(verbose: bool, serving: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose {
        "debug"
    } else if serving {
        "info"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

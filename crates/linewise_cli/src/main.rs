//! Linewise CLI
//!
//! Checks and fixes tab characters and runs of blank lines.

mod cli;
mod commands;
mod fix;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Check {
            files,
            format,
            fix,
            dry_run,
            timings,
        } => commands::check::run_check(
            cli.config.as_deref(),
            files,
            *format,
            *fix,
            *dry_run,
            *timings,
        ),
        Commands::Rules => commands::rules::run_rules().map(|_| false),
    }
}

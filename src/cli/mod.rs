//! Command line interface for nap_packager.
//!
//! This module parses arguments, sets up logging and dispatches to the
//! environment check or packaging workflow.

mod args;
pub mod commands;
mod output;

pub use args::{Args, Command, RuntimeConfig};
pub use output::OutputManager;

use crate::error::{BundlerError, CliError, EXIT_BAD_INPUT, EXIT_SUCCESS, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => return Ok(report_parse_error(e)),
    };

    init_logging(&args);

    args.validate()
        .map_err(|reason| BundlerError::Cli(CliError::InvalidArguments { reason }))?;

    let config = RuntimeConfig::from(&args);
    match &args.command {
        Command::CheckEnv { yes } => commands::check_environment(&config, *yes).await,
        Command::Package { project_name } => {
            commands::package_by_name(&args, &config, project_name).await
        }
        Command::PackageDir {
            project_path,
            no_pause,
        } => commands::package_by_dir(&args, &config, project_path, *no_pause).await,
    }
}

/// Prints clap's message and picks the exit code: help and version requests
/// succeed, usage errors exit with 1.
fn report_parse_error(e: clap::Error) -> i32 {
    let code = if e.use_stderr() {
        EXIT_BAD_INPUT
    } else {
        EXIT_SUCCESS
    };
    if let Err(print_err) = e.print() {
        log::debug!("Could not print usage: {}", print_err);
    }
    code
}

/// Initializes `env_logger`. `RUST_LOG` overrides the verbosity flags.
fn init_logging(args: &Args) {
    let default_filter = if args.quiet {
        "error"
    } else if args.verbose {
        "nap_packager=debug"
    } else {
        "nap_packager=info"
    };

    if let Err(e) =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
            .format_timestamp(None)
            .format_target(false)
            .try_init()
    {
        log::debug!("Logger already initialized: {}", e);
    }
}

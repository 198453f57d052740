//! Top-level error types and process exit codes.
//!
//! This module defines the errors surfaced by the CLI and maps each of them to
//! the exit code documented for the packaging and environment workflows.

use crate::environment::EnvironmentError;
use thiserror::Error;

/// Successful run, including the unsupported Linux packaging path.
pub const EXIT_SUCCESS: i32 = 0;
/// Bad usage, fatal environment mismatch or any other failure.
pub const EXIT_BAD_INPUT: i32 = 1;
/// No project, example or demo with the requested name.
pub const EXIT_MISSING_PROJECT: i32 = 2;
/// `project.json` is missing or invalid.
pub const EXIT_INVALID_PROJECT_JSON: i32 = 3;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Environment check errors
    #[error("{0}")]
    Environment(#[from] EnvironmentError),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Bundler(e) => e.exit_code(),
            Self::Environment(EnvironmentError::Command(e)) => e.exit_code(),
            _ => EXIT_BAD_INPUT,
        }
    }
}

impl crate::bundler::Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ProjectNotFound { .. } => EXIT_MISSING_PROJECT,
            Self::InvalidManifest { .. } => EXIT_INVALID_PROJECT_JSON,
            _ => EXIT_BAD_INPUT,
        }
    }
}

//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Usage errors are
//! reported with exit code 1 by [`super::run`], so exit code 2 stays reserved
//! for a missing project.

use crate::bundler::Platform;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build environment checker and project packager for NAP
#[derive(Parser, Debug)]
#[command(
    name = "nap_packager",
    version,
    about = "Build environment checker and project packager for NAP",
    long_about = "Checks that a Linux host can build NAP, and packages NAP projects, examples and demos
into distributable archives named {title}-{version}-{platform}-{timestamp}.

Usage:
  nap_packager check-env
  nap_packager package LightSequencer
  nap_packager package-dir ../examples/helloworld

Exit codes: 0 success, 1 bad usage or failure, 2 project not found, 3 invalid project.json."
)]
pub struct Args {
    /// NAP root containing projects/, examples/ and demos/
    ///
    /// Defaults to the parent of the directory holding this executable.
    #[arg(long, global = true, env = "NAP_ROOT", value_name = "PATH")]
    pub nap_root: Option<PathBuf>,

    /// Target platform; defaults to the host platform
    #[arg(long, global = true, env = "NAP_PACKAGE_PLATFORM", value_enum)]
    pub platform: Option<Platform>,

    /// Run the Linux toolchain instead of reporting Linux as unsupported
    #[arg(long, global = true)]
    pub experimental_linux: bool,

    /// Show detailed progress
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether this Linux host is ready to build NAP
    CheckEnv {
        /// Install missing packages without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Package a project, example or demo by name
    Package {
        /// Project name; matched case-insensitively against directory names
        #[arg(value_name = "PROJECT_NAME")]
        project_name: String,
    },

    /// Package the project in the given directory
    PackageDir {
        /// Path to the project directory, e.g. examples/helloworld
        #[arg(value_name = "PROJECT_PATH")]
        project_path: PathBuf,

        /// Do not wait for a key press before exiting
        #[arg(long)]
        no_pause: bool,
    },
}

impl Args {
    /// Parse command line arguments
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Package { project_name } if project_name.trim().is_empty() => {
                Err("PROJECT_NAME cannot be empty".to_string())
            }
            Command::PackageDir { project_path, .. } if project_path.as_os_str().is_empty() => {
                Err("PROJECT_PATH cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print a message and wait for a key press
    pub fn pause(&self, message: &str) -> std::io::Result<()> {
        self.output.pause(message)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

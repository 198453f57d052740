//! Build environment checker and project packager for NAP.
//!
//! This library provides:
//! - Linux build host verification with optional `apt` remediation
//!   ([`environment`])
//! - Project packaging: resolve a project, example or demo, build it with the
//!   platform toolchain and archive the result ([`bundler`])
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod environment;
pub mod error;
pub mod metadata;
pub mod source;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};

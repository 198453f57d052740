//! Command execution functions for each subcommand.

mod check_env;
mod package;

pub use check_env::check_environment;
pub use package::{package_by_dir, package_by_name};

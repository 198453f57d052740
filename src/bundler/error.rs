//! Error types for packaging operations.
//!
//! Every failure in the packaging pipeline is an [`Error`]. The variants that
//! map to dedicated process exit codes (missing project, invalid manifest) are
//! kept distinct from generic failures so the CLI can report them precisely.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// Result type for packaging operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving, building and archiving a project.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No project, example or demo directory matched the requested name.
    #[error("Couldn't find project or example with name '{name}' (searched: {})", display_paths(.searched))]
    ProjectNotFound {
        /// Name as given on the command line
        name: String,
        /// Candidate directories, in search order
        searched: Vec<PathBuf>,
    },

    /// `project.json` is missing, malformed or lacks required fields.
    #[error("Invalid project manifest {}: {reason}", .path.display())]
    InvalidManifest {
        /// Manifest location
        path: PathBuf,
        /// Human readable cause
        reason: String,
    },

    /// An external tool exited with a non-zero status.
    #[error("`{command}` failed with {status}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit status reported by the OS
        status: ExitStatus,
    },

    /// An external tool could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandSpawn {
        /// Rendered command line
        command: String,
        /// Underlying spawn error
        #[source]
        error: io::Error,
    },

    /// A required tool is not on `PATH`.
    #[error("required tool `{tool}` was not found in PATH")]
    ToolNotFound {
        /// Program name
        tool: String,
    },

    /// Filesystem failure with the offending path attached.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being attempted
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: io::Error,
    },

    /// Plain IO failure.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Zip archive creation failure.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory traversal failure.
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix stripping failed while staging files.
    #[error("path error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attach a path to IO errors.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] describing the attempted action.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Add a message to an `Option` or foreign error.
pub trait Context<T> {
    /// Turns `None` or an error into [`Error::GenericError`] carrying `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path() {
        let err: Result<()> = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .fs_context("removing staging directory", "/tmp/staging");
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("removing staging directory"));
        assert!(msg.contains("/tmp/staging"));
    }

    #[test]
    fn project_not_found_lists_candidates() {
        let err = Error::ProjectNotFound {
            name: "Foo".into(),
            searched: vec![PathBuf::from("/nap/projects/foo"), PathBuf::from("/nap/demos/foo")],
        };
        let msg = err.to_string();
        assert!(msg.contains("'Foo'"));
        assert!(msg.contains("/nap/projects/foo, /nap/demos/foo"));
    }

    #[test]
    fn option_context() {
        let none: Option<u8> = None;
        assert!(matches!(none.context("missing"), Err(Error::GenericError(m)) if m == "missing"));
    }
}

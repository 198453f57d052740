//! External command execution.
//!
//! All toolchain, archiver and package-manager invocations go through the
//! [`CommandRunner`] trait so the packaging and environment workflows can be
//! exercised without spawning real processes.

use crate::bundler::error::{Error, Result};
use async_trait::async_trait;
use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    process::Stdio,
};

/// A single external command: program, arguments and working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// Creates a command for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the command from `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Arguments as lossy UTF-8 strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Executes external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `cmd` with inherited stdio and fails on a non-zero exit status.
    async fn run(&self, cmd: &ToolCommand) -> Result<()>;

    /// Runs `cmd`, returning its trimmed stdout regardless of exit status.
    ///
    /// Used for host queries such as `dpkg -l`, where a non-zero status is
    /// an answer rather than a failure.
    async fn capture(&self, cmd: &ToolCommand) -> Result<String>;
}

/// [`CommandRunner`] that spawns real processes with `tokio::process`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(cmd: &ToolCommand) -> Result<tokio::process::Command> {
        let program = which::which(cmd.program()).map_err(|e| {
            log::debug!("{} not found in PATH: {}", cmd.program(), e);
            Error::ToolNotFound {
                tool: cmd.program().to_string(),
            }
        })?;
        log::debug!("Resolved {} to {}", cmd.program(), program.display());

        let mut command = tokio::process::Command::new(program);
        command.args(cmd.get_args());
        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }
        Ok(command)
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, cmd: &ToolCommand) -> Result<()> {
        log::debug!("Running: {cmd}");
        let status = Self::command(cmd)?
            .status()
            .await
            .map_err(|error| Error::CommandSpawn {
                command: cmd.to_string(),
                error,
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: cmd.to_string(),
                status,
            });
        }
        Ok(())
    }

    async fn capture(&self, cmd: &ToolCommand) -> Result<String> {
        log::debug!("Querying: {cmd}");
        let output = Self::command(cmd)?
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|error| Error::CommandSpawn {
                command: cmd.to_string(),
                error,
            })?;

        if !output.status.success() {
            log::debug!(
                "{} exited with {:?}: {}",
                cmd,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = ToolCommand::new("cmake")
            .args(["-G", "Visual Studio 14 2015 Win64"])
            .current_dir("/tmp");
        assert_eq!(cmd.to_string(), "cmake -G \"Visual Studio 14 2015 Win64\"");
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
    }

    #[tokio::test]
    async fn missing_tool_is_reported_before_spawning() {
        let cmd = ToolCommand::new("nap-packager-no-such-tool-xyz");
        let err = SystemRunner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { tool } if tool == "nap-packager-no-such-tool-xyz"));
    }
}

//! Shared helpers for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use nap_packager::bundler::{CommandRunner, Error, Result, ToolCommand};
use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitStatus,
    sync::Mutex,
};
use tempfile::TempDir;

/// Creates `<nap_root>/<root>/<dir>/project.json` with the given contents.
pub fn write_project(nap_root: &Path, root: &str, dir: &str, manifest: &str) -> PathBuf {
    let project_dir = nap_root.join(root).join(dir);
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(project_dir.join("project.json"), manifest).unwrap();
    project_dir
}

/// A NAP root with `projects/demo` titled "Demo", version "1.2".
pub fn nap_with_demo() -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let project_dir = write_project(
        tmp.path(),
        "projects",
        "demo",
        r#"{"title":"Demo","version":"1.2"}"#,
    );
    (tmp, project_dir)
}

/// Records commands instead of running them, imitating their side effects
/// on disk.
///
/// - `cmake -H<src> -B<build>` creates the build directory.
/// - A build command (`cmake --build`, `xcodebuild`, `make`) installs a few
///   files, `.DS_Store` included, into `<cwd>/../bin_package`.
/// - `zip` and `tar` write a placeholder archive named by their second
///   argument, after noting whether the staged folder held any `.DS_Store`.
#[derive(Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<ToolCommand>>,
    staged_finder_files: Mutex<Vec<PathBuf>>,
    fail_prefix: Option<String>,
}

/// Exit status 1.
pub fn failure_status() -> ExitStatus {
    #[cfg(unix)]
    use std::os::unix::process::ExitStatusExt;
    #[cfg(windows)]
    use std::os::windows::process::ExitStatusExt;

    #[cfg(unix)]
    let raw = 1 << 8;
    #[cfg(windows)]
    let raw = 1;
    ExitStatus::from_raw(raw)
}

impl RecordingRunner {
    /// A runner whose commands starting with `prefix` exit with status 1,
    /// without side effects.
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_prefix: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    pub fn commands(&self) -> Vec<ToolCommand> {
        self.commands.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }

    /// `.DS_Store` files present when the archiver ran.
    pub fn staged_finder_files(&self) -> Vec<PathBuf> {
        self.staged_finder_files.lock().unwrap().clone()
    }

    fn install(cwd: &Path) {
        let bin = cwd.parent().unwrap().join("bin_package");
        fs::create_dir_all(bin.join("lib")).unwrap();
        fs::write(bin.join("demo.exe"), b"binary").unwrap();
        fs::write(bin.join("lib").join("libnap.so"), b"library").unwrap();
        fs::write(bin.join(".DS_Store"), b"finder").unwrap();
        fs::write(bin.join("lib").join(".DS_Store"), b"finder").unwrap();
    }

    fn write_archive(&self, cwd: &Path, args: &[String]) {
        let staged = cwd.join(&args[2]);
        let finder: Vec<PathBuf> = walkdir::WalkDir::new(&staged)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() == ".DS_Store")
            .map(|e| e.into_path())
            .collect();
        self.staged_finder_files.lock().unwrap().extend(finder);
        fs::write(cwd.join(&args[1]), b"archive").unwrap();
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, cmd: &ToolCommand) -> Result<()> {
        self.commands.lock().unwrap().push(cmd.clone());

        if let Some(prefix) = &self.fail_prefix {
            if cmd.to_string().starts_with(prefix.as_str()) {
                return Err(Error::CommandFailed {
                    command: cmd.to_string(),
                    status: failure_status(),
                });
            }
        }

        let args = cmd.args_lossy();
        let cwd = cmd.get_current_dir().map(Path::to_path_buf);
        let is_build = match cmd.program() {
            "cmake" => args.first().map(String::as_str) == Some("--build"),
            "xcodebuild" | "make" => true,
            _ => false,
        };

        if let Some(build_dir) = args.iter().find_map(|a| a.strip_prefix("-B")) {
            fs::create_dir_all(build_dir).unwrap();
        }

        if is_build {
            Self::install(&cwd.unwrap());
        } else if matches!(cmd.program(), "zip" | "tar") {
            self.write_archive(&cwd.unwrap(), &args);
        }
        Ok(())
    }

    async fn capture(&self, cmd: &ToolCommand) -> Result<String> {
        self.commands.lock().unwrap().push(cmd.clone());
        Ok(String::new())
    }
}

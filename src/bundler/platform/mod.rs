//! Platform-specific toolchain and archive strategies.
//!
//! Each supported [`Platform`] has one [`PlatformStrategy`] implementing the
//! three packaging steps: generate build files, build the install target and
//! archive the installed output. Strategies are looked up through
//! [`strategy_for`].
//!
//! # Module Organization
//!
//! - `linux` - make + `tar -cJ` (disabled unless explicitly enabled)
//! - `macos` - Xcode + `zip -yr`, with `.DS_Store` purging
//! - `windows` - Visual Studio + in-process zip with two-level staging

mod linux;
mod macos;
mod windows;

use crate::{
    bundler::{
        artifact::PackageArtifact,
        error::Result,
        process::{CommandRunner, ToolCommand},
        settings::Settings,
    },
    source::ProjectDescriptor,
};
use async_trait::async_trait;
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use linux::LinuxStrategy;
pub use macos::MacOsStrategy;
pub use windows::WindowsStrategy;

/// Target platform of a packaging run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Platform {
    Linux,
    #[value(name = "macos")]
    MacOs,
    Windows,
}

impl Platform {
    /// Every platform, in strategy table order.
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::MacOs, Platform::Windows];

    /// The platform this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Label embedded in archive names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Windows => "Win64",
        }
    }

    pub fn archive_format(self) -> ArchiveFormat {
        match self {
            Self::Linux => ArchiveFormat::TarXz,
            Self::MacOs | Self::Windows => ArchiveFormat::Zip,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Linux => 0,
            Self::MacOs => 1,
            Self::Windows => 2,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Archive container written by a strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarXz,
}

impl ArchiveFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::TarXz => "tar.xz",
        }
    }
}

/// Everything a strategy needs for one run.
pub struct PackageContext<'a> {
    pub settings: &'a Settings,
    pub project: &'a ProjectDescriptor,
    pub runner: &'a dyn CommandRunner,
}

impl PackageContext<'_> {
    pub fn project_dir(&self) -> &Path {
        &self.project.resolved_path
    }

    /// Install destination of the build, `<project>/bin_package`.
    pub fn bin_dir(&self) -> PathBuf {
        self.settings.layout().bin_path(self.project_dir())
    }

    /// Transient CMake build directory, `<project>/build_package`.
    pub fn build_dir(&self) -> PathBuf {
        self.settings.layout().build_path(self.project_dir())
    }

    /// `-DPROJECT_PACKAGE_BIN_DIR=bin_package`
    fn package_bin_define(&self) -> String {
        format!("-DPROJECT_PACKAGE_BIN_DIR={}", self.settings.layout().bin_dir)
    }

    /// `cmake -H<project> -B<build>` with no generator arguments yet.
    fn cmake_generate(&self) -> ToolCommand {
        ToolCommand::new("cmake")
            .arg(format!("-H{}", self.project_dir().display()))
            .arg(format!("-B{}", self.build_dir().display()))
    }
}

/// Generate, build and archive steps for one platform.
#[async_trait]
pub trait PlatformStrategy: Send + Sync {
    fn platform(&self) -> Platform;

    /// Whether this strategy does any work with the given settings.
    ///
    /// Unsupported strategies are skipped after stale output is cleaned.
    fn is_supported(&self, _settings: &Settings) -> bool {
        true
    }

    /// Generates native build files into [`PackageContext::build_dir`].
    async fn generate(&self, ctx: &PackageContext<'_>) -> Result<()>;

    /// Builds and installs into [`PackageContext::bin_dir`].
    async fn build(&self, ctx: &PackageContext<'_>) -> Result<()>;

    /// Archives the installed output, returning the archive path.
    ///
    /// The staging directory is consumed; only the archive remains.
    async fn archive(&self, ctx: &PackageContext<'_>, artifact: &PackageArtifact) -> Result<PathBuf>;
}

static STRATEGIES: [&dyn PlatformStrategy; 3] = [&LinuxStrategy, &MacOsStrategy, &WindowsStrategy];

/// Looks up the strategy for `platform`.
pub fn strategy_for(platform: Platform) -> &'static dyn PlatformStrategy {
    STRATEGIES[platform.index()]
}

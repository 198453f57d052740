//! Core Settings struct and implementations.

use super::PackagingLayout;
use crate::bundler::platform::Platform;
use std::path::{Path, PathBuf};

/// Main settings for packaging operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Holds the NAP
/// root that projects are resolved against, the target platform and the
/// directory layout used while building and staging.
///
/// # Examples
///
/// ```no_run
/// use nap_packager::bundler::{Platform, SettingsBuilder};
///
/// # fn example() -> nap_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .nap_root("/opt/nap")
///     .platform(Platform::Windows)
///     .build()?;
/// assert_eq!(settings.platform(), Platform::Windows);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute NAP root containing `projects/`, `examples/` and `demos/`.
    nap_root: PathBuf,

    /// Platform whose toolchain and archive format are used.
    platform: Platform,

    /// Directory and file names.
    layout: PackagingLayout,

    /// Fixed archive timestamp. `None` means local time at packaging.
    timestamp: Option<String>,

    /// Run the Linux toolchain instead of reporting it unsupported.
    experimental_linux: bool,

    /// Parallel jobs for `make`.
    build_jobs: usize,
}

impl Settings {
    /// Returns the NAP root.
    pub fn nap_root(&self) -> &Path {
        &self.nap_root
    }

    /// Returns the target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the directory layout.
    pub fn layout(&self) -> &PackagingLayout {
        &self.layout
    }

    /// Returns the fixed timestamp, if one was configured.
    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    /// Whether the Linux toolchain path is enabled.
    pub fn experimental_linux(&self) -> bool {
        self.experimental_linux
    }

    /// Number of parallel native build jobs.
    pub fn build_jobs(&self) -> usize {
        self.build_jobs
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    pub(super) fn new(
        nap_root: PathBuf,
        platform: Platform,
        layout: PackagingLayout,
        timestamp: Option<String>,
        experimental_linux: bool,
        build_jobs: usize,
    ) -> Self {
        Self {
            nap_root,
            platform,
            layout,
            timestamp,
            experimental_linux,
            build_jobs,
        }
    }
}

//! Builder for constructing Settings.

use super::{PackagingLayout, Settings};
use crate::bundler::platform::Platform;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use nap_packager::bundler::{Platform, SettingsBuilder};
///
/// # fn example() -> nap_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .nap_root("../nap")
///     .platform(Platform::MacOs)
///     .timestamp("2020.01.01T10.00")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    nap_root: Option<PathBuf>,
    platform: Option<Platform>,
    layout: PackagingLayout,
    timestamp: Option<String>,
    experimental_linux: bool,
    build_jobs: Option<usize>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the NAP root. Relative paths are absolutized against the
    /// current directory at [`build`](Self::build) time.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn nap_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.nap_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the target platform.
    ///
    /// Default: [`Platform::host`]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the directory layout.
    pub fn layout(mut self, layout: PackagingLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Pins the archive timestamp instead of reading the clock.
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Enables the Linux toolchain path.
    pub fn experimental_linux(mut self, enabled: bool) -> Self {
        self.experimental_linux = enabled;
        self
    }

    /// Sets parallel jobs for `make`.
    ///
    /// Default: number of logical CPUs
    pub fn build_jobs(mut self, jobs: usize) -> Self {
        self.build_jobs = Some(jobs);
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `nap_root` is missing or cannot be absolutized.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::{Context, ErrorExt};

        let nap_root = self.nap_root.context("nap_root is required")?;
        let nap_root = nap_root
            .absolutize()
            .fs_context("resolving NAP root", &nap_root)?
            .into_owned();

        Ok(Settings::new(
            nap_root,
            self.platform.unwrap_or_else(Platform::host),
            self.layout,
            self.timestamp,
            self.experimental_linux,
            self.build_jobs.unwrap_or_else(num_cpus::get).max(1),
        ))
    }
}

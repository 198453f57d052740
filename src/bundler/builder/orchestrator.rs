//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] that resolves a project, drives the
//! platform toolchain and archives the result.

use crate::{
    bundler::{
        artifact::{BundledArtifact, PackageArtifact, timestamp_now},
        error::{ErrorExt, Result},
        platform::{PackageContext, Platform, strategy_for},
        process::{CommandRunner, SystemRunner},
        settings::Settings,
        utils::fs,
    },
    source::{self, ProjectDescriptor},
};
use std::sync::Arc;

use super::checksum::calculate_sha256;

/// Result of a packaging run that did not fail.
#[derive(Debug)]
pub enum PackageOutcome {
    /// An archive was written.
    Packaged(BundledArtifact),
    /// The platform has no packaging support; nothing was built.
    Unsupported(Platform),
}

/// Packaging orchestrator.
///
/// Runs the steps for one project strictly in order, stopping at the first
/// failure:
///
/// 1. Resolve the project and read `project.json`
/// 2. Remove stale `bin_package` and `build_package` directories
/// 3. Generate native build files with CMake
/// 4. Build and install into `bin_package`
/// 5. Archive the installed output
/// 6. Remove `build_package`
///
/// A failing external command aborts the run without cleaning up partial
/// output directories.
///
/// # Examples
///
/// ```no_run
/// use nap_packager::bundler::{PackageOutcome, Packager, SettingsBuilder};
///
/// # async fn example() -> nap_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new().nap_root("/opt/nap").build()?;
/// let packager = Packager::new(settings);
///
/// if let PackageOutcome::Packaged(bundle) = packager.package("HelloWorld").await? {
///     println!("Created {} ({} bytes)", bundle.path.display(), bundle.size);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Packager {
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
}

impl std::fmt::Debug for Packager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packager")
            .field("settings", &self.settings)
            .field("runner", &"<CommandRunner>")
            .finish()
    }
}

impl Packager {
    /// Creates a packager that runs real processes.
    pub fn new(settings: Settings) -> Self {
        Self::with_runner(settings, Arc::new(SystemRunner))
    }

    /// Creates a packager with a custom command runner.
    pub fn with_runner(settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        Self { settings, runner }
    }

    /// Returns a reference to the packaging settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves `project_name` and reads its manifest.
    pub fn resolve(&self, project_name: &str) -> Result<ProjectDescriptor> {
        source::load_project(self.settings.nap_root(), self.settings.layout(), project_name)
    }

    /// Packages `project_name` for the configured platform.
    ///
    /// # Errors
    ///
    /// - [`Error::ProjectNotFound`](crate::bundler::Error::ProjectNotFound) if
    ///   no project, example or demo matches
    /// - [`Error::InvalidManifest`](crate::bundler::Error::InvalidManifest) if
    ///   `project.json` is unusable
    /// - [`Error::CommandFailed`](crate::bundler::Error::CommandFailed) if a
    ///   toolchain or archive command exits non-zero
    pub async fn package(&self, project_name: &str) -> Result<PackageOutcome> {
        let project = self.resolve(project_name)?;
        log::info!("Packaging {} v{}", project.full_title, project.version);

        let timestamp = self
            .settings
            .timestamp()
            .map(String::from)
            .unwrap_or_else(timestamp_now);

        let layout = self.settings.layout();
        let build_dir = layout.build_path(&project.resolved_path);
        fs::remove_dir_all(&layout.bin_path(&project.resolved_path)).await?;
        fs::remove_dir_all(&build_dir).await?;

        let platform = self.settings.platform();
        let strategy = strategy_for(platform);
        if !strategy.is_supported(&self.settings) {
            log::warn!("{} packaging is not yet supported; nothing was built", platform);
            return Ok(PackageOutcome::Unsupported(platform));
        }

        let ctx = PackageContext {
            settings: &self.settings,
            project: &project,
            runner: self.runner.as_ref(),
        };

        strategy.generate(&ctx).await?;
        strategy.build(&ctx).await?;

        let artifact = PackageArtifact::new(&project.full_title, &project.version, platform, timestamp);
        let path = strategy.archive(&ctx, &artifact).await?;

        fs::remove_dir_all(&build_dir).await?;

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();
        let checksum = calculate_sha256(&path).await?;
        log::info!("Packaged to {}", path.display());

        Ok(PackageOutcome::Packaged(BundledArtifact {
            artifact,
            path,
            size,
            checksum,
        }))
    }
}

//! macOS packaging with Xcode and `zip`.

use super::{PackageContext, Platform, PlatformStrategy};
use crate::bundler::{
    artifact::PackageArtifact,
    error::Result,
    process::ToolCommand,
    utils::fs,
};
use async_trait::async_trait;
use std::path::PathBuf;

/// Finder metadata files that must not ship.
const FINDER_METADATA: &str = ".DS_Store";

/// Xcode + `zip -yr` strategy.
///
/// The install directory is renamed in place to the package name, cleaned of
/// Finder metadata and zipped with symlinks preserved (`-y`), which keeps
/// framework bundles intact.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacOsStrategy;

#[async_trait]
impl PlatformStrategy for MacOsStrategy {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    async fn generate(&self, ctx: &PackageContext<'_>) -> Result<()> {
        let cmd = ctx.cmake_generate().args(["-G", "Xcode"]);
        ctx.runner.run(&cmd).await
    }

    async fn build(&self, ctx: &PackageContext<'_>) -> Result<()> {
        let cmd = ToolCommand::new("xcodebuild")
            .args(["-configuration", "Release", "-target", "install"])
            .current_dir(ctx.build_dir());
        ctx.runner.run(&cmd).await
    }

    async fn archive(&self, ctx: &PackageContext<'_>, artifact: &PackageArtifact) -> Result<PathBuf> {
        let project_dir = ctx.project_dir();
        let staging_dir = project_dir.join(&artifact.filename);
        fs::move_dir(&ctx.bin_dir(), &staging_dir).await?;

        let purged = fs::purge_files_named(&staging_dir, FINDER_METADATA).await?;
        if purged > 0 {
            log::debug!("Removed {} {} file(s)", purged, FINDER_METADATA);
        }

        let archive_name = artifact.file_name_with_ext();
        log::info!("Archiving to {}..", archive_name);
        let cmd = ToolCommand::new("zip")
            .arg("-yr")
            .arg(&archive_name)
            .arg(&artifact.filename)
            .current_dir(project_dir);
        ctx.runner.run(&cmd).await?;

        fs::remove_dir_all(&staging_dir).await?;
        Ok(project_dir.join(archive_name))
    }
}

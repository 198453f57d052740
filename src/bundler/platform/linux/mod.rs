//! Linux packaging with make and `tar -cJ`.
//!
//! Linux packaging is not supported yet. The strategy reports itself
//! unsupported unless the experimental path is enabled in [`Settings`].

use super::{PackageContext, Platform, PlatformStrategy};
use crate::bundler::{
    artifact::PackageArtifact,
    error::Result,
    process::ToolCommand,
    settings::Settings,
    utils::fs,
};
use async_trait::async_trait;
use std::path::PathBuf;

/// Unix Makefiles + xz tarball strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinuxStrategy;

#[async_trait]
impl PlatformStrategy for LinuxStrategy {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn is_supported(&self, settings: &Settings) -> bool {
        settings.experimental_linux()
    }

    async fn generate(&self, ctx: &PackageContext<'_>) -> Result<()> {
        let cmd = ctx
            .cmake_generate()
            .arg("-DCMAKE_BUILD_TYPE=Release")
            .arg(ctx.package_bin_define());
        ctx.runner.run(&cmd).await
    }

    async fn build(&self, ctx: &PackageContext<'_>) -> Result<()> {
        let cmd = ToolCommand::new("make")
            .args(["all", "install"])
            .arg(format!("-j{}", ctx.settings.build_jobs()))
            .current_dir(ctx.build_dir());
        ctx.runner.run(&cmd).await
    }

    async fn archive(&self, ctx: &PackageContext<'_>, artifact: &PackageArtifact) -> Result<PathBuf> {
        let project_dir = ctx.project_dir();
        let staging_dir = project_dir.join(&artifact.filename);
        fs::move_dir(&ctx.bin_dir(), &staging_dir).await?;

        let archive_name = artifact.file_name_with_ext();
        log::info!("Archiving to {}..", archive_name);
        let cmd = ToolCommand::new("tar")
            .arg("-cJvf")
            .arg(&archive_name)
            .arg(&artifact.filename)
            .current_dir(project_dir);
        ctx.runner.run(&cmd).await?;

        fs::remove_dir_all(&staging_dir).await?;
        Ok(project_dir.join(archive_name))
    }
}

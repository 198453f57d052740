//! Windows packaging with Visual Studio and zip.
//!
//! Build output is moved into `<project>/archiving/<package name>/` and the
//! `archiving` directory is zipped, so the archive opens to a single folder
//! named after the package.

mod archive;

use super::{Platform, PackageContext, PlatformStrategy};
use crate::bundler::{
    artifact::PackageArtifact,
    error::Result,
    process::ToolCommand,
    utils::fs,
};
use async_trait::async_trait;
use std::path::PathBuf;

/// CMake generator for 64-bit Visual Studio builds.
pub const VS_GENERATOR: &str = "Visual Studio 14 2015 Win64";

/// Python version passed through to pybind11.
pub const PYBIND11_PYTHON_VERSION: &str = "3.5";

/// Visual Studio + zip strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowsStrategy;

#[async_trait]
impl PlatformStrategy for WindowsStrategy {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    async fn generate(&self, ctx: &PackageContext<'_>) -> Result<()> {
        let cmd = ctx
            .cmake_generate()
            .args(["-G", VS_GENERATOR])
            .arg(format!("-DPYBIND11_PYTHON_VERSION={PYBIND11_PYTHON_VERSION}"))
            .arg(ctx.package_bin_define());
        ctx.runner.run(&cmd).await
    }

    async fn build(&self, ctx: &PackageContext<'_>) -> Result<()> {
        let cmd = ToolCommand::new("cmake")
            .args(["--build", ".", "--target"])
            .arg(ctx.project.dir_name())
            .args(["--config", "Release"])
            .current_dir(ctx.build_dir());
        ctx.runner.run(&cmd).await
    }

    async fn archive(&self, ctx: &PackageContext<'_>, artifact: &PackageArtifact) -> Result<PathBuf> {
        let project_dir = ctx.project_dir();
        let archiving_parent = ctx.settings.layout().archiving_path(project_dir);

        fs::create_dir_all(&archiving_parent, true).await?;
        fs::move_dir(&ctx.bin_dir(), &archiving_parent.join(&artifact.filename)).await?;

        let archive_path = project_dir.join(artifact.file_name_with_ext());
        log::info!("Archiving to {}..", archive_path.display());
        archive::zip_directory(&archiving_parent, &archive_path).await?;

        fs::remove_dir_all(&archiving_parent).await?;
        Ok(archive_path)
    }
}

//! `package` and `package-dir`: project packaging.

use crate::{
    bundler::{PackageOutcome, Packager, Platform, Settings, SettingsBuilder},
    cli::{Args, RuntimeConfig},
    error::{EXIT_SUCCESS, Result},
    source::ProjectDirSource,
};
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Packages `project_name` under the NAP root from the arguments.
pub async fn package_by_name(args: &Args, config: &RuntimeConfig, project_name: &str) -> Result<i32> {
    let nap_root = match &args.nap_root {
        Some(root) => root.clone(),
        None => default_nap_root()?,
    };
    let settings = settings_for(args, &nap_root)?;
    package(settings, config, project_name).await
}

/// Packages the project at `project_path`; its NAP root is two levels up.
///
/// On macOS and Windows the process waits for a key press afterwards, also
/// after a failure, so output stays visible when launched from a file manager.
pub async fn package_by_dir(
    args: &Args,
    config: &RuntimeConfig,
    project_path: &Path,
    no_pause: bool,
) -> Result<i32> {
    let result = package_source(args, config, project_path).await;

    if let Err(e) = &result {
        // Report before pausing.
        log::error!("{}", e);
    }
    if pauses_after_run(no_pause, Platform::host()) {
        config.pause("Press any key to close...")?;
    }
    result
}

async fn package_source(args: &Args, config: &RuntimeConfig, project_path: &Path) -> Result<i32> {
    let source = ProjectDirSource::parse(project_path)?;
    config.verbose_println(&format!(
        "Project {} in NAP root {}",
        source.name,
        source.nap_root.display()
    ))?;

    let settings = settings_for(args, &source.nap_root)?;
    package(settings, config, &source.name).await
}

fn pauses_after_run(no_pause: bool, host: Platform) -> bool {
    !no_pause && host != Platform::Linux
}

async fn package(settings: Settings, config: &RuntimeConfig, project_name: &str) -> Result<i32> {
    let packager = Packager::new(settings);
    config.progress(&format!(
        "Packaging {} for {}",
        project_name,
        packager.settings().platform()
    ))?;

    match packager.package(project_name).await? {
        PackageOutcome::Packaged(bundle) => {
            config.success(&format!("Packaged to {}", bundle.path.display()))?;
            config.indent(&format!("{} bytes", bundle.size))?;
            config.indent(&format!("SHA256 {}", bundle.checksum))?;
        }
        PackageOutcome::Unsupported(platform) => {
            config.warn(&format!(
                "{platform} not yet supported... sorry. Nothing was packaged."
            ))?;
        }
    }
    Ok(EXIT_SUCCESS)
}

fn settings_for(args: &Args, nap_root: &Path) -> Result<Settings> {
    let mut builder = SettingsBuilder::new()
        .nap_root(nap_root)
        .experimental_linux(args.experimental_linux);
    if let Some(platform) = args.platform {
        builder = builder.platform(platform);
    }
    Ok(builder.build()?)
}

/// The NAP root is the parent of the directory holding this executable
/// (`<nap_root>/tools/nap_packager`).
fn default_nap_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the nap_packager executable")?;
    let root = exe
        .parent()
        .and_then(Path::parent)
        .with_context(|| format!("{} has no NAP root above it; pass --nap-root", exe.display()))?;
    Ok(root.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_only_on_desktop_hosts() {
        assert!(pauses_after_run(false, Platform::Windows));
        assert!(pauses_after_run(false, Platform::MacOs));
        assert!(!pauses_after_run(false, Platform::Linux));
        assert!(!pauses_after_run(true, Platform::Windows));
    }

    #[tokio::test]
    async fn unusable_path_fails_through_the_pause() {
        let args = <Args as clap::Parser>::try_parse_from(["nap_packager", "-q", "package-dir", "/"]).unwrap();
        let config = RuntimeConfig::from(&args);
        let err = package_by_dir(&args, &config, Path::new("/"), false)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_BAD_INPUT);
    }
}

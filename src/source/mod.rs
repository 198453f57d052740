//! Project resolution inside a NAP root.

use crate::bundler::{Error, PackagingLayout, Result};
use crate::metadata;
use path_absolutize::Absolutize;
use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Which root a project was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectKind {
    Project,
    Example,
    Demo,
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Project => "project",
            Self::Example => "example",
            Self::Demo => "demo",
        })
    }
}

/// A resolved project with its manifest data. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDescriptor {
    /// Name as requested.
    pub name: String,
    pub version: String,
    /// Title from the manifest.
    pub full_title: String,
    /// Project directory.
    pub resolved_path: PathBuf,
    pub kind: ProjectKind,
}

impl ProjectDescriptor {
    /// Lowercased name: the directory name and the CMake target name.
    pub fn dir_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Finds the directory of `name` under `nap_root`.
///
/// Looks for the lowercased name in the projects, examples and demos roots,
/// in that order. The first existing directory wins.
pub fn resolve_project(
    nap_root: &Path,
    layout: &PackagingLayout,
    name: &str,
) -> Result<(PathBuf, ProjectKind)> {
    let dir_name = name.to_lowercase();
    let candidates = [
        (&layout.projects_dir, ProjectKind::Project),
        (&layout.examples_dir, ProjectKind::Example),
        (&layout.demos_dir, ProjectKind::Demo),
    ]
    .map(|(root, kind)| (nap_root.join(root).join(&dir_name), kind));

    for (path, kind) in &candidates {
        if path.exists() {
            log::info!("Found {} {} at {}", kind, name, path.display());
            return Ok((path.clone(), *kind));
        }
        log::debug!("No {} at {}", kind, path.display());
    }

    Err(Error::ProjectNotFound {
        name: name.to_string(),
        searched: candidates.into_iter().map(|(path, _)| path).collect(),
    })
}

/// Resolves `name` and reads its manifest.
pub fn load_project(
    nap_root: &Path,
    layout: &PackagingLayout,
    name: &str,
) -> Result<ProjectDescriptor> {
    let (resolved_path, kind) = resolve_project(nap_root, layout, name)?;
    let manifest = metadata::read_manifest(&layout.manifest_path(&resolved_path))?;

    Ok(ProjectDescriptor {
        name: name.to_string(),
        version: manifest.version,
        full_title: manifest.title,
        resolved_path,
        kind,
    })
}

/// A project given by its directory, as when launched from a file manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDirSource {
    /// Final path component of the project directory.
    pub name: String,
    /// Two levels above the project directory.
    pub nap_root: PathBuf,
}

impl ProjectDirSource {
    /// Splits `<nap_root>/<root>/<name>` into name and NAP root.
    ///
    /// Trailing separators are ignored.
    pub fn parse(project_path: &Path) -> Result<Self> {
        let absolute = project_path.absolutize().map_err(|e| {
            Error::GenericError(format!("Invalid project path {}: {}", project_path.display(), e))
        })?;

        let name = absolute
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                Error::GenericError(format!(
                    "Project path has no directory name: {}",
                    project_path.display()
                ))
            })?
            .to_string();

        let nap_root = absolute
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| {
                Error::GenericError(format!(
                    "Project path is too shallow to contain a NAP root: {}",
                    project_path.display()
                ))
            })?
            .to_path_buf();

        Ok(Self { name, nap_root })
    }
}

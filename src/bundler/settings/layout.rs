//! Directory and file names used inside a NAP tree.

use std::path::{Path, PathBuf};

/// Where projects live under the NAP root and what the packager writes
/// inside a project directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagingLayout {
    /// Root holding user projects (searched first).
    pub projects_dir: String,
    /// Root holding examples (searched second).
    pub examples_dir: String,
    /// Root holding demos (searched last).
    pub demos_dir: String,
    /// Manifest file inside a project directory.
    pub manifest_file: String,
    /// Install destination of the packaging build, relative to the project.
    pub bin_dir: String,
    /// Transient CMake build directory, relative to the project.
    pub build_dir: String,
    /// Parent of the two-level Windows staging directory.
    pub archiving_dir: String,
}

impl Default for PackagingLayout {
    fn default() -> Self {
        Self {
            projects_dir: "projects".into(),
            examples_dir: "examples".into(),
            demos_dir: "demos".into(),
            manifest_file: "project.json".into(),
            bin_dir: "bin_package".into(),
            build_dir: "build_package".into(),
            archiving_dir: "archiving".into(),
        }
    }
}

impl PackagingLayout {
    pub fn manifest_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.manifest_file)
    }

    pub fn bin_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.bin_dir)
    }

    pub fn build_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.build_dir)
    }

    pub fn archiving_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.archiving_dir)
    }
}

//! Project manifest (`project.json`) reading.

use crate::bundler::{Error, Result};
use std::path::Path;

/// Fields of `project.json` used for packaging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectManifest {
    /// Project version, e.g. `"0.4"`.
    pub version: String,

    /// Human readable title, used as the archive name prefix.
    pub title: String,
}

/// Reads `version` and `title` from the manifest at `manifest_path`.
///
/// The file is read and parsed once. A missing file, malformed JSON, a
/// non-object document or a missing/non-string field all yield
/// [`Error::InvalidManifest`], so packaging stops before any build runs.
pub fn read_manifest(manifest_path: &Path) -> Result<ProjectManifest> {
    let invalid = |reason: String| Error::InvalidManifest {
        path: manifest_path.to_path_buf(),
        reason,
    };

    // Step 1: Read file once
    let contents = std::fs::read_to_string(manifest_path)
        .map_err(|e| invalid(format!("failed to read: {e}")))?;

    // Step 2: Parse JSON once
    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| invalid(format!("not valid JSON: {e}")))?;

    if !value.is_object() {
        return Err(invalid("top level must be a JSON object".to_string()));
    }

    // Step 3: Extract required fields (no additional I/O)
    let field = |key: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| invalid(format!("missing string field '{key}'")))
    };

    let manifest = ProjectManifest {
        version: field("version")?,
        title: field("title")?,
    };
    log::debug!(
        "Read manifest {}: {} v{}",
        manifest_path.display(),
        manifest.title,
        manifest.version
    );
    Ok(manifest)
}

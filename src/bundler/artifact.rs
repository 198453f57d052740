//! Package artifact naming.

use crate::bundler::platform::{ArchiveFormat, Platform};
use std::path::PathBuf;

/// `chrono` format of the timestamp embedded in archive names.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%dT%H.%M";

/// Local time formatted as `YYYY.MM.DDTHH.MM`.
pub fn timestamp_now() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Builds `"{title}-{version}-{platform}-{timestamp}"`.
///
/// # Examples
///
/// ```
/// use nap_packager::bundler::build_archive_name;
///
/// assert_eq!(
///     build_archive_name("Demo", "1.2", "Win64", "2020.01.01T10.00"),
///     "Demo-1.2-Win64-2020.01.01T10.00"
/// );
/// ```
pub fn build_archive_name(title: &str, version: &str, platform: &str, timestamp: &str) -> String {
    format!("{title}-{version}-{platform}-{timestamp}")
}

/// The distributable archive for one packaging run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageArtifact {
    /// Platform the archive was built for.
    pub platform: Platform,
    /// Archive name without extension; also the top-level folder inside it.
    pub filename: String,
    /// Timestamp embedded in `filename`.
    pub timestamp: String,
}

impl PackageArtifact {
    pub fn new(title: &str, version: &str, platform: Platform, timestamp: String) -> Self {
        let filename = build_archive_name(title, version, platform.label(), &timestamp);
        Self {
            platform,
            filename,
            timestamp,
        }
    }

    /// Archive format for this platform.
    pub fn format(&self) -> ArchiveFormat {
        self.platform.archive_format()
    }

    /// `filename` plus the archive extension, e.g. `Demo-1.2-Win64-....zip`.
    pub fn file_name_with_ext(&self) -> String {
        format!("{}.{}", self.filename, self.format().extension())
    }
}

/// A finished archive on disk.
#[derive(Clone, Debug)]
pub struct BundledArtifact {
    pub artifact: PackageArtifact,
    /// Location of the archive file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive.
    pub checksum: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_name_formatting() {
        assert_eq!(
            build_archive_name("Demo", "1.2", "Win64", "2020.01.01T10.00"),
            "Demo-1.2-Win64-2020.01.01T10.00"
        );
    }

    #[test]
    fn extension_follows_platform() {
        let win = PackageArtifact::new("Demo", "1.2", Platform::Windows, "2020.01.01T10.00".into());
        assert_eq!(win.file_name_with_ext(), "Demo-1.2-Win64-2020.01.01T10.00.zip");

        let mac = PackageArtifact::new("Demo", "1.2", Platform::MacOs, "2020.01.01T10.00".into());
        assert_eq!(mac.filename, "Demo-1.2-macOS-2020.01.01T10.00");
        assert_eq!(mac.file_name_with_ext(), "Demo-1.2-macOS-2020.01.01T10.00.zip");

        let linux = PackageArtifact::new("Demo", "1.2", Platform::Linux, "2020.01.01T10.00".into());
        assert_eq!(linux.file_name_with_ext(), "Demo-1.2-Linux-2020.01.01T10.00.tar.xz");
    }

    #[test]
    fn timestamp_shape() {
        let ts = timestamp_now();
        // YYYY.MM.DDTHH.MM
        assert_eq!(ts.len(), 16);
        assert_eq!(&ts[4..5], ".");
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[13..14], ".");
    }
}

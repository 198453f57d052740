//! File system utilities for packaging.
//!
//! Idempotent directory helpers with path-annotated errors.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Moves a directory to `to`, which must not exist yet.
pub async fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if !fs::try_exists(from).await.unwrap_or(false) {
        return Err(Error::GenericError(format!(
            "{} does not exist; the build did not install anything",
            from.display()
        )));
    }
    fs::rename(from, to)
        .await
        .fs_context("moving build output to", to)
}

/// Deletes every regular file named `file_name` below `dir`.
///
/// Returns the number of files removed.
pub async fn purge_files_named(dir: &Path, file_name: &'static str) -> Result<usize> {
    let dir = dir.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let mut removed = 0;
        for entry in walkdir::WalkDir::new(&dir).follow_links(false) {
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name() == file_name {
                std::fs::remove_file(entry.path()).fs_context("removing", entry.path())?;
                log::debug!("Removed {}", entry.path().display());
                removed += 1;
            }
        }
        Ok::<usize, Error>(removed)
    })
    .await
    .map_err(|e| Error::GenericError(format!("File purge task panicked: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn remove_missing_dir_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        remove_dir_all(&tmp.path().join("absent")).await.unwrap();
    }

    #[tokio::test]
    async fn create_with_erase_empties_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("archiving");
        std::fs::create_dir_all(dir.join("stale")).unwrap();

        create_dir_all(&dir, true).await.unwrap();

        assert!(dir.is_dir());
        assert!(!dir.join("stale").exists());
    }

    #[tokio::test]
    async fn purge_removes_only_matching_files() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("lib").join("data");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(tmp.path().join(".DS_Store"), b"x").unwrap();
        std::fs::write(nested.join(".DS_Store"), b"x").unwrap();
        std::fs::write(nested.join("keep.txt"), b"x").unwrap();

        let removed = purge_files_named(tmp.path(), ".DS_Store").await.unwrap();

        assert_eq!(removed, 2);
        assert!(!nested.join(".DS_Store").exists());
        assert!(nested.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn move_missing_source_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = move_dir(&tmp.path().join("bin_package"), &tmp.path().join("out"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("did not install anything"));
    }
}

//! In-process zip archive creation.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    fs::File,
    io::{self, BufWriter},
    path::{Component, Path},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Zips everything below `root` into `dest`.
///
/// Entry names are relative to `root`, so the directories directly inside
/// `root` become the top-level folders of the archive.
pub async fn zip_directory(root: &Path, dest: &Path) -> Result<()> {
    let root = root.to_path_buf();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let file = File::create(&dest).fs_context("creating archive", &dest)?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        let base = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in walkdir::WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            let name = entry_name(entry.path().strip_prefix(&root)?);
            let options = with_permissions(base, entry.path());

            if entry.file_type().is_dir() {
                zip.add_directory(format!("{name}/"), options)?;
            } else if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
                zip.add_symlink(name, target.to_string_lossy().into_owned(), options)?;
            } else {
                zip.start_file(name, options)?;
                let mut source = File::open(entry.path()).fs_context("opening", entry.path())?;
                io::copy(&mut source, &mut zip).fs_context("compressing", entry.path())?;
            }
        }

        zip.finish()?;
        Ok::<(), Error>(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Zip task panicked: {}", e)))?
}

/// Archive entry name with `/` separators regardless of host.
fn entry_name(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, path: &Path) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    match std::fs::symlink_metadata(path) {
        Ok(meta) => options.unix_permissions(meta.permissions().mode()),
        Err(_) => options,
    }
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _path: &Path) -> SimpleFileOptions {
    options
}

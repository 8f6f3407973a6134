use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use bzip2::Compression;
use tar::{Archive, Builder};
use walkdir::WalkDir;

use crate::error::{CircmanError, Result};

/// Writes a bzip2 tarball of everything below `root`, stored with paths
/// relative to `root`. The archive file must not already exist; a partial
/// file is removed on failure.
pub fn create_archive(root: &Path, archive: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(archive)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => CircmanError::message(format!(
                "create {}: a backup already exists for this second",
                archive.display()
            )),
            _ => CircmanError::message(format!("create {}: {}", archive.display(), e)),
        })?;
    let result = write_entries(root, file);
    if result.is_err() {
        let _ = fs::remove_file(archive);
    }
    result
}

fn write_entries(root: &Path, file: File) -> Result<()> {
    let mut builder = Builder::new(BzEncoder::new(file, Compression::best()));
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let path = entry.path();
        let rel = path.strip_prefix(root).unwrap_or(path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        if entry.file_type().is_dir() {
            builder.append_dir(rel, path)?;
        } else {
            builder.append_path_with_name(path, rel)?;
        }
    }
    let encoder = builder.into_inner()?;
    encoder.finish()?.sync_all()?;
    Ok(())
}

/// Unpacks `archive` into `dest`, replacing files that already exist.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut tar = Archive::new(BzDecoder::new(file));
    tar.set_overwrite(true);
    tar.set_preserve_mtime(true);
    tar.unpack(dest)?;
    Ok(())
}

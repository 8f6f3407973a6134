use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CircmanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    /// Write a file only when the destination is missing or older.
    Update,
    /// Write every file.
    Overwrite,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub skipped: usize,
}

/// Recursively copies the contents of `source` into `dest`. Files that exist
/// only under `dest` are never removed.
pub fn copy_tree(source: &Path, dest: &Path, mode: CopyMode) -> Result<CopyStats> {
    if !source.is_dir() {
        return Err(CircmanError::message(format!(
            "cannot copy tree {}: not a directory",
            source.display()
        )));
    }
    fs::create_dir_all(dest)?;

    let mut stats = CopyStats::default();
    for entry in WalkDir::new(source).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        let src_path = entry.path();
        let rel = src_path.strip_prefix(source).unwrap_or(src_path);
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if mode == CopyMode::Update && !is_newer(src_path, &target)? {
            debug!("not copying {} (output up-to-date)", src_path.display());
            stats.skipped += 1;
            continue;
        }
        copy_file(src_path, &target)?;
        stats.copied += 1;
    }
    Ok(stats)
}

fn is_newer(source: &Path, target: &Path) -> io::Result<bool> {
    let target_meta = match fs::metadata(target) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(err) => return Err(err),
    };
    let source_mtime = fs::metadata(source)?.modified()?;
    Ok(source_mtime > target_meta.modified()?)
}

fn copy_file(source: &Path, target: &Path) -> io::Result<()> {
    debug!("copying {} -> {}", source.display(), target.display());
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, target)?;
    let modified = fs::metadata(source)?.modified()?;
    File::options()
        .write(true)
        .open(target)?
        .set_modified(modified)?;
    Ok(())
}

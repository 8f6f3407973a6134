use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::archive::tarball::{create_archive, extract_archive};
use crate::archive::{ArchiveCatalog, ArchiveListing};
use crate::config::Settings;
use crate::error::Result;
use crate::types::Rank;
use crate::util::copy::{copy_tree, CopyMode, CopyStats};

pub fn list_recent(settings: &Settings) -> Result<Vec<ArchiveListing>> {
    ArchiveCatalog::new(&settings.backup_dir).recent(settings.list_limit)
}

/// Snapshots the device into a new archive named after the current UTC time.
pub fn backup(settings: &Settings, device: &Path) -> Result<PathBuf> {
    backup_at(settings, device, Utc::now())
}

pub fn backup_at(settings: &Settings, device: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    let archive = ArchiveCatalog::new(&settings.backup_dir).path_for(now);
    info!("Archiving to {}", archive.display());
    create_archive(device, &archive)?;
    Ok(archive)
}

/// Extracts the archive at `rank` onto the device. Existing files are
/// replaced and no backup is taken first.
pub fn restore(settings: &Settings, device: &Path, rank: Rank) -> Result<PathBuf> {
    let archive = ArchiveCatalog::new(&settings.backup_dir).select(rank)?;
    info!("Restoring {}", archive.display());
    extract_archive(&archive, device)?;
    Ok(archive)
}

pub fn deploy(settings: &Settings, device: &Path, source: &Path) -> Result<CopyStats> {
    backup(settings, device)?;
    info!("Deploying {} to {}", source.display(), device.display());
    copy_tree(source, device, CopyMode::Update)
}

/// Copies the device over `dest` without comparing files and without a
/// backup of `dest`.
pub fn sync(device: &Path, dest: &Path) -> Result<CopyStats> {
    info!("Copying {} to {}", device.display(), dest.display());
    copy_tree(device, dest, CopyMode::Overwrite)
}

//! The backup directory as a flat, append-only set of timestamped tarballs.
//!
//! Archive names embed a fixed-width UTC timestamp, so sorting by filename
//! is the same as sorting by creation time.

pub mod tarball;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{ArchiveError, Result};
use crate::types::Rank;

pub const ARCHIVE_PREFIX: &str = "archive-";
pub const ARCHIVE_EXTENSION: &str = ".tar.bz2";
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const LISTING_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn archive_file_name(now: DateTime<Utc>) -> String {
    format!(
        "{}{}{}",
        ARCHIVE_PREFIX,
        now.format(ARCHIVE_TIMESTAMP_FORMAT),
        ARCHIVE_EXTENSION
    )
}

/// One row of `circman list`.
#[derive(Debug, Clone)]
pub struct ArchiveListing {
    pub number: usize,
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

impl fmt::Display for ArchiveListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        write!(
            f,
            "{} - {} - {}",
            self.number,
            self.modified.format(LISTING_TIME_FORMAT),
            name
        )
    }
}

pub struct ArchiveCatalog<'a> {
    dir: &'a Path,
}

impl<'a> ArchiveCatalog<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir
    }

    pub fn path_for(&self, now: DateTime<Utc>) -> PathBuf {
        self.dir.join(archive_file_name(now))
    }

    /// Archives in ascending filename order, oldest first.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut archives = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(ARCHIVE_EXTENSION) {
                archives.push(entry.path());
            }
        }
        archives.sort();
        Ok(archives)
    }

    pub fn select(&self, rank: Rank) -> Result<PathBuf> {
        let mut archives = self.list()?;
        if archives.is_empty() {
            return Err(ArchiveError::NoBackups.into());
        }
        let available = archives.len();
        if rank.get() > available {
            return Err(ArchiveError::NotFound {
                rank: rank.get(),
                available,
            }
            .into());
        }
        Ok(archives.swap_remove(available - rank.get()))
    }

    /// The newest `limit` archives, numbered so that each number is its rank.
    pub fn recent(&self, limit: usize) -> Result<Vec<ArchiveListing>> {
        let archives = self.list()?;
        let start = archives.len().saturating_sub(limit);
        let recent = &archives[start..];
        let count = recent.len();
        let mut out = Vec::with_capacity(count);
        for (index, path) in recent.iter().enumerate() {
            let modified = fs::metadata(path)?.modified()?;
            out.push(ArchiveListing {
                number: count - index,
                path: path.clone(),
                modified: DateTime::<Utc>::from(modified),
            });
        }
        Ok(out)
    }
}

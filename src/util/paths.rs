use std::fs;
use std::path::Path;

use crate::error::{CircmanError, Result};

pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        let meta = fs::metadata(path)
            .map_err(|e| CircmanError::message(format!("stat {}: {}", path.display(), e)))?;
        if !meta.is_dir() {
            return Err(CircmanError::message(format!(
                "{} is not a directory",
                path.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(path)
        .map_err(|e| CircmanError::message(format!("create {}: {}", path.display(), e)))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirAccess {
    Read,
    Write,
}

/// Checks that `path` is an existing directory the current user can read
/// or write. Failures are usage errors attributed to `option`.
pub fn require_dir(option: &'static str, path: &Path, access: DirAccess) -> Result<()> {
    let invalid = |reason: &'static str| CircmanError::InvalidPath {
        option,
        path: path.to_path_buf(),
        reason,
    };
    let meta = fs::metadata(path).map_err(|_| invalid("does not exist"))?;
    if !meta.is_dir() {
        return Err(invalid("is a file"));
    }
    if !has_access(path, access) {
        return Err(match access {
            DirAccess::Read => invalid("is not readable"),
            DirAccess::Write => invalid("is not writable"),
        });
    }
    Ok(())
}

/// access(2), so read-only mounts and foreign ownership are caught too.
#[cfg(unix)]
fn has_access(path: &Path, access: DirAccess) -> bool {
    use rustix::fs::Access;

    let mode = match access {
        DirAccess::Read => Access::READ_OK | Access::EXEC_OK,
        DirAccess::Write => Access::WRITE_OK | Access::EXEC_OK,
    };
    rustix::fs::access(path, mode).is_ok()
}

#[cfg(not(unix))]
fn has_access(path: &Path, access: DirAccess) -> bool {
    match access {
        DirAccess::Read => true,
        DirAccess::Write => fs::metadata(path)
            .map(|meta| !meta.permissions().readonly())
            .unwrap_or(false),
    }
}

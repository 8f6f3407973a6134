use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{CircmanError, DeviceError, Result};
use crate::mount::table::{find_labelled_mount, parse_mount_output};
use crate::mount::MountSource;
use crate::util::paths::{require_dir, DirAccess};

pub const DEVICE_OPTION: &str = "'-d' / '--device'";

const SUPPORTED_FAMILY: &str = "unix";

/// Finds the mounted target volume by scanning the host mount table.
pub struct DeviceLocator<'a> {
    mounts: &'a dyn MountSource,
    label: &'a str,
    commands: &'a [String],
    family: &'a str,
}

impl<'a> DeviceLocator<'a> {
    pub fn new(mounts: &'a dyn MountSource, settings: &'a Settings) -> Self {
        Self {
            mounts,
            label: &settings.device_label,
            commands: &settings.mount_commands,
            family: std::env::consts::FAMILY,
        }
    }

    pub fn with_family(mut self, family: &'a str) -> Self {
        self.family = family;
        self
    }

    /// Only the first mount command that exists is consulted; within its
    /// output the last matching entry wins.
    pub fn locate(&self) -> Result<Option<PathBuf>> {
        if self.family != SUPPORTED_FAMILY {
            return Err(DeviceError::UnsupportedPlatform(self.family.to_string()).into());
        }
        for program in self.commands {
            let output = match self.mounts.mount_output(program) {
                Ok(output) => output,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!("{} not available, trying next mount command", program);
                    continue;
                }
                Err(err) => {
                    return Err(CircmanError::message(format!("{}: {}", program, err)));
                }
            };
            let entries = parse_mount_output(&output);
            return Ok(match find_labelled_mount(&entries, self.label) {
                Some(entry) => {
                    info!(
                        "Found {} ({}) at {}",
                        entry.label().unwrap_or(self.label),
                        entry.source,
                        entry.mount_point.display()
                    );
                    Some(entry.mount_point.clone())
                }
                None => {
                    debug!("no {} volume in {} output", self.label, program);
                    None
                }
            });
        }
        Ok(None)
    }
}

/// Turns an optional device path into a usable one, or the error that ends a
/// device-bound command with exit code 2.
pub fn require_device(device: Option<&Path>) -> Result<PathBuf> {
    let device = match device {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => return Err(DeviceError::Missing.into()),
    };
    require_dir(DEVICE_OPTION, device, DirAccess::Write)?;
    Ok(device.to_path_buf())
}

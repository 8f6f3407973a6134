pub mod table;

use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

/// Runs a mount-listing program and hands back its raw stdout.
///
/// A program that is not installed must surface as `io::ErrorKind::NotFound`
/// so callers can fall through to the next candidate.
pub trait MountSource {
    fn mount_output(&self, program: &str) -> io::Result<Vec<u8>>;
}

/// Spawns the real mount command.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMounts;

impl MountSource for SystemMounts {
    fn mount_output(&self, program: &str) -> io::Result<Vec<u8>> {
        debug!("running {}", program);
        let output = Command::new(program)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()?;
        if !output.status.success() {
            return Err(io::Error::other(format!(
                "{} failed with exit code {}",
                program,
                output.status.code().unwrap_or(1)
            )));
        }
        Ok(output.stdout)
    }
}

use tracing::debug;

use crate::cli::args::SyncArgs;
use crate::cli::commands::resolve_device;
use crate::config::Settings;
use crate::error::Result;
use crate::mount::MountSource;
use crate::ops::sync;
use crate::util::paths::{require_dir, DirAccess};

pub fn run_sync(settings: &Settings, mounts: &dyn MountSource, args: &SyncArgs) -> Result<()> {
    let device = resolve_device(&args.device, settings, mounts)?;
    require_dir("'-D' / '--dest'", &args.dest, DirAccess::Write)?;
    let stats = sync(&device, &args.dest)?;
    debug!("copied {} file(s)", stats.copied);
    Ok(())
}

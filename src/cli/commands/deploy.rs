use tracing::debug;

use crate::cli::args::DeployArgs;
use crate::cli::commands::resolve_device;
use crate::config::Settings;
use crate::error::Result;
use crate::mount::MountSource;
use crate::ops::deploy;
use crate::util::paths::{require_dir, DirAccess};

pub fn run_deploy(settings: &Settings, mounts: &dyn MountSource, args: &DeployArgs) -> Result<()> {
    let device = resolve_device(&args.device, settings, mounts)?;
    require_dir("'-s' / '--source'", &args.source, DirAccess::Read)?;
    let stats = deploy(settings, &device, &args.source)?;
    debug!(
        "deployed {} file(s), {} already up to date",
        stats.copied, stats.skipped
    );
    Ok(())
}

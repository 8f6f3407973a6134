use crate::cli::args::RestoreArgs;
use crate::cli::commands::resolve_device;
use crate::config::Settings;
use crate::error::Result;
use crate::mount::MountSource;
use crate::ops::restore;

pub fn run_restore(settings: &Settings, mounts: &dyn MountSource, args: &RestoreArgs) -> Result<()> {
    let device = resolve_device(&args.device, settings, mounts)?;
    restore(settings, &device, args.archive)?;
    Ok(())
}

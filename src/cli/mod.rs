use anyhow::Result;
use clap::{CommandFactory, Parser};

use crate::cli::args::Cli;
use crate::cli::commands::{dispatch, exit_for_error};
use crate::config::load_settings;
use crate::logging::init_logging;
use crate::mount::SystemMounts;
use crate::util::paths::ensure_dir;

pub mod args;
pub mod commands;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => exit_for_error(&err, None),
    };
    init_logging(&settings.log_file, cli.verbose)?;
    ensure_dir(&settings.backup_dir)?;

    if let Err(err) = dispatch(&command, &settings, &SystemMounts) {
        exit_for_error(&err, Some(command.name()));
    }
    Ok(())
}

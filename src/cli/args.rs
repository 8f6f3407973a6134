use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::Rank;

#[derive(Parser, Debug)]
#[command(
    name = "circman",
    version,
    about = "Manager for CircuitPython project deployment."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Settings file (defaults to the per-user circman.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log debug details, including every copied file
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List backups that can be restored.
    List,
    /// Restore a backup.
    Restore(RestoreArgs),
    /// Copy the source directory to the device directory.
    Deploy(DeployArgs),
    /// Copy the device directory to the source directory.
    ///
    /// This will overwrite files in dest without prompting and without backup
    /// so use with caution.
    Sync(SyncArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::List => "list",
            Command::Restore(_) => "restore",
            Command::Deploy(_) => "deploy",
            Command::Sync(_) => "sync",
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct DeviceArgs {
    /// CIRCUITPY path. If not provided, autodiscovery is attempted.
    #[arg(short = 'd', long = "device")]
    pub device: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RestoreArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Number of backup to restore. Use the list command to find the backup
    /// number. Defaults to restoring the most recent backup.
    #[arg(short = 'a', long = "archive", default_value_t = Rank::MOST_RECENT)]
    pub archive: Rank,
}

#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Directory to deploy.
    #[arg(short = 's', long = "source", default_value = "src")]
    pub source: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    #[command(flatten)]
    pub device: DeviceArgs,
    /// Destination directory.
    #[arg(short = 'D', long = "dest", default_value = "src")]
    pub dest: PathBuf,
}

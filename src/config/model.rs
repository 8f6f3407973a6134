use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEVICE_LABEL: &str = "CIRCUITPY";
pub const DEFAULT_MOUNT_COMMANDS: [&str; 2] = ["mount", "/sbin/mount"];
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// On-disk settings file. Every key is optional and falls back to a default.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default, rename = "backupDir", skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    #[serde(default, rename = "logFile", skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default, rename = "deviceLabel", skip_serializing_if = "Option::is_none")]
    pub device_label: Option<String>,
    #[serde(default, rename = "mountCommands", skip_serializing_if = "Option::is_none")]
    pub mount_commands: Option<Vec<String>>,
    #[serde(default, rename = "listLimit", skip_serializing_if = "Option::is_none")]
    pub list_limit: Option<usize>,
}

/// Resolved settings, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backup_dir: PathBuf,
    pub log_file: PathBuf,
    pub device_label: String,
    pub mount_commands: Vec<String>,
    pub list_limit: usize,
}

impl Settings {
    pub fn new(backup_dir: PathBuf, log_file: PathBuf) -> Self {
        Self {
            backup_dir,
            log_file,
            device_label: DEFAULT_DEVICE_LABEL.to_string(),
            mount_commands: DEFAULT_MOUNT_COMMANDS
                .iter()
                .map(|cmd| cmd.to_string())
                .collect(),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

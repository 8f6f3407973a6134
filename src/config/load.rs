use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::model::{
    Config, Settings, DEFAULT_DEVICE_LABEL, DEFAULT_LIST_LIMIT, DEFAULT_MOUNT_COMMANDS,
};
use crate::error::{ConfigError, Result};

const APP_NAME: &str = "circman";
const CONFIG_FILE: &str = "circman.yaml";
const LOG_FILE: &str = "circman.log";

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

fn default_backup_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME).join("archives"))
        .ok_or_else(|| ConfigError::Invalid("cannot determine user data directory".to_string()).into())
}

fn default_log_file() -> Result<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|dir| dir.join(APP_NAME).join("logs").join(LOG_FILE))
        .ok_or_else(|| ConfigError::Invalid("cannot determine user log directory".to_string()).into())
}

pub fn load_config(path: &Path) -> Result<Config> {
    let unreadable = |e: std::io::Error| ConfigError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };
    let mut contents = String::new();
    File::open(path)
        .map_err(unreadable)?
        .read_to_string(&mut contents)
        .map_err(unreadable)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg: Config =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(cfg)
}

/// Builds the settings for this run. An explicit path must exist; otherwise
/// the per-user config file is read only when present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let cfg = match path {
        Some(path) => load_config(path)?,
        None => match default_config_path() {
            Some(path) if path.is_file() => load_config(&path)?,
            _ => Config::default(),
        },
    };
    resolve_settings(cfg)
}

pub fn resolve_settings(cfg: Config) -> Result<Settings> {
    let device_label = cfg
        .device_label
        .unwrap_or_else(|| DEFAULT_DEVICE_LABEL.to_string());
    if device_label.trim().is_empty() {
        return Err(ConfigError::Invalid("deviceLabel must not be empty".to_string()).into());
    }
    let mount_commands = cfg.mount_commands.unwrap_or_else(|| {
        DEFAULT_MOUNT_COMMANDS
            .iter()
            .map(|cmd| cmd.to_string())
            .collect()
    });
    if mount_commands.is_empty() || mount_commands.iter().any(|cmd| cmd.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "mountCommands must list at least one command".to_string(),
        )
        .into());
    }
    let list_limit = cfg.list_limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if list_limit == 0 {
        return Err(ConfigError::Invalid("listLimit must be 1 or greater".to_string()).into());
    }
    let backup_dir = match cfg.backup_dir {
        Some(dir) => dir,
        None => default_backup_dir()?,
    };
    let log_file = match cfg.log_file {
        Some(file) => file,
        None => default_log_file()?,
    };

    Ok(Settings {
        backup_dir,
        log_file,
        device_label,
        mount_commands,
        list_limit,
    })
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CircmanError {
    #[error("{0}")]
    Message(String),
    #[error("{0}")]
    Device(DeviceError),
    #[error("{0}")]
    Archive(ArchiveError),
    #[error("{0}")]
    Config(ConfigError),
    #[error("Invalid value for {option}: Directory '{}' {reason}.", .path.display())]
    InvalidPath {
        option: &'static str,
        path: PathBuf,
        reason: &'static str,
    },
    #[error("{0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("Missing option '-d' / '--device'.")]
    Missing,
    #[error("OS '{0}' not supported.")]
    UnsupportedPlatform(String),
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("No backup found to restore.")]
    NoBackups,
    #[error("Backup not found.")]
    NotFound { rank: usize, available: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("parse config: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CircmanError>;

impl CircmanError {
    pub fn message(msg: impl Into<String>) -> Self {
        CircmanError::Message(msg.into())
    }
}

impl From<DeviceError> for CircmanError {
    fn from(err: DeviceError) -> Self {
        CircmanError::Device(err)
    }
}

impl From<ArchiveError> for CircmanError {
    fn from(err: ArchiveError) -> Self {
        CircmanError::Archive(err)
    }
}

impl From<ConfigError> for CircmanError {
    fn from(err: ConfigError) -> Self {
        CircmanError::Config(err)
    }
}

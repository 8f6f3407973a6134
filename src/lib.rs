//! Deploy project files to a CircuitPython board and keep timestamped
//! backups of whatever was on it before.

pub mod archive;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod mount;
pub mod ops;
pub mod types;
pub mod util;

pub use config::Settings;
pub use error::{CircmanError, Result};

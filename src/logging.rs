use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{CircmanError, Result};
use crate::util::paths::ensure_dir;

const LOG_TIME_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

/// Console gets bare messages; the log file gets timestamped lines with levels.
pub fn init_logging(log_file: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        ensure_dir(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| CircmanError::message(format!("open log {}: {}", log_file.display(), e)))?;

    let level = if verbose { "debug" } else { "info" };
    let console = fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_writer(io::stdout);
    let logfile = fmt::layer()
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(logfile)
        .try_init();
    Ok(())
}

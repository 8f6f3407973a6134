use tracing::info;

use crate::archive::ArchiveListing;
use crate::config::Settings;
use crate::error::Result;
use crate::ops::list_recent;

const HEADER: &str = "Backups:";

pub fn run_list(settings: &Settings) -> Result<()> {
    let listing = list_recent(settings)?;
    for line in listing_lines(&listing) {
        info!("{}", line);
    }
    Ok(())
}

pub fn listing_lines(listing: &[ArchiveListing]) -> Vec<String> {
    std::iter::once(HEADER.to_string())
        .chain(listing.iter().map(|entry| entry.to_string()))
        .collect()
}

use crate::extract::extract_error::ExtractError;
use std::fs::File;
use std::path::Path;

/// makes sure the feed archive exists at `cache_path`, downloading it from
/// `url` on first use and reusing the cached copy afterwards.
pub fn ensure_feed(url: &str, cache_path: &Path) -> Result<(), ExtractError> {
    if cache_path.exists() {
        log::info!("using cached feed archive at {cache_path:?}");
        return Ok(());
    }
    if let Some(parent) = cache_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    log::info!("downloading feed archive from {url}");
    let mut response = reqwest::blocking::get(url)?.error_for_status()?;
    let mut file = File::create(cache_path)?;
    std::io::copy(&mut response, &mut file)?;
    log::info!("feed archive cached at {cache_path:?}");
    Ok(())
}

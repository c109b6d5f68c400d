//! Crawler module for page fetching and image harvesting
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching of pages and images
//! - HTML parsing and link/image extraction
//! - The page crawl loop over the frontier
//! - The image download loop with size filtering and placement

mod downloader;
mod fetcher;
mod harvester;
mod parser;

pub use downloader::DownloadOutcome;
pub use fetcher::{build_http_client, fetch_bytes, fetch_page};
pub use harvester::Harvester;
pub use parser::{extract_image_urls, extract_links, parse_page};

use crate::config::HarvestConfig;
use crate::HarvestError;
use std::collections::HashSet;

/// Runs a complete harvest: one crawl followed by one download pass
///
/// It will:
/// 1. Validate the configuration and build the harvester
/// 2. Crawl up to `max_pages` pages
/// 3. Attempt up to `how_many` of the discovered images
///
/// Returns the harvester so the caller can inspect its state or keep going.
///
/// # Example
///
/// ```no_run
/// use image_harvester::config::load_config;
/// use image_harvester::crawler::harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let harvester = harvest(config, 50, 200).await?;
/// println!("{:?}", harvester.stats());
/// # Ok(())
/// # }
/// ```
pub async fn harvest(
    config: HarvestConfig,
    max_pages: usize,
    how_many: usize,
) -> Result<Harvester, HarvestError> {
    let harvester = Harvester::new(config)?;

    let found: HashSet<String> = harvester.scrape(max_pages).await?;
    tracing::info!("Discovered {} new images", found.len());

    harvester.download(how_many).await?;

    Ok(harvester)
}

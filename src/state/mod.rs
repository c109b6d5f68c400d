//! State module for tracking harvest progress
//!
//! This module holds the long-lived state a harvester mutates across repeated
//! crawl and download calls.
//!
//! # Components
//!
//! - `Frontier`: explored and pending pages plus every discovered image URL
//! - `DownloadLedger`: attempted images and the save index
//! - `CrawlState`: the two above, tied to a seed and its root origin

mod frontier;
mod ledger;

// Re-export main types
pub use frontier::Frontier;
pub use ledger::DownloadLedger;

use crate::url::{parse_seed, root_origin};
use crate::UrlResult;
use url::Url;

/// Everything a harvester remembers about one site
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// Parsed seed, used only for origin checks
    seed: Url,
    root: String,
    pub frontier: Frontier,
    pub ledger: DownloadLedger,
}

impl CrawlState {
    /// Creates the state for a seed; the root origin is derived once, here
    ///
    /// The frontier starts with the seed exactly as written, so a page that
    /// links back to that same string does not queue it a second time.
    pub fn new(seed: &str) -> UrlResult<Self> {
        let parsed = parse_seed(seed)?;
        let root = root_origin(&parsed);
        Ok(Self {
            seed: parsed,
            root,
            frontier: Frontier::new(seed),
            ledger: DownloadLedger::new(),
        })
    }

    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// `scheme://host[:port]` of the seed
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Claims the next image to attempt, if any is left
    pub fn claim_image(&mut self) -> Option<String> {
        self.ledger.claim_next(self.frontier.discovered_images())
    }

    /// Number of discovered images that have not been attempted
    pub fn pending_images(&self) -> usize {
        self.ledger.pending(self.frontier.discovered_images())
    }
}

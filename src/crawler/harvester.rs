//! Harvester - owner of the crawl state and the page crawl loop
//!
//! A `Harvester` is created once per site and then driven by repeated
//! `scrape` and `download` calls, in any interleaving. All state lives behind
//! one lock that is only held between network calls, never across them, so a
//! shared `Arc<Harvester>` can be driven from several tasks without two of
//! them ever processing the same page or image.

use crate::config::{compile_filter, validate, HarvestConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::{extract_image_urls, extract_links, parse_page};
use crate::output::HarvestStats;
use crate::state::CrawlState;
use crate::HarvestError;
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Image harvester for a single site
pub struct Harvester {
    pub(crate) config: Arc<HarvestConfig>,
    page_filter: Regex,
    image_filter: Regex,
    pub(crate) client: Client,
    state: Mutex<CrawlState>,
}

impl Harvester {
    /// Creates a harvester, validating the configuration first
    ///
    /// Nothing is fetched here; an invalid configuration fails before any
    /// network activity.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use image_harvester::{HarvestConfig, Harvester};
    ///
    /// # async fn example() -> image_harvester::Result<()> {
    /// let mut config = HarvestConfig::new("https://example.com/");
    /// config.min_width = 300;
    ///
    /// let harvester = Harvester::new(config)?;
    /// let found = harvester.scrape(10).await?;
    /// println!("{} new images", found.len());
    /// harvester.download(found.len()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        validate(&config)?;

        let page_filter = compile_filter(&config.regex_pages)?;
        let image_filter = compile_filter(&config.regex_images)?;
        let client = build_http_client(&config.fetch)?;

        let state = CrawlState::new(&config.seed)?;
        tracing::info!("The root of the seed appears to be: {}", state.root());

        Ok(Self {
            config: Arc::new(config),
            page_filter,
            image_filter,
            client,
            state: Mutex::new(state),
        })
    }

    /// Locks the crawl state
    ///
    /// Every mutation keeps the sets consistent before releasing the lock, so
    /// a panic elsewhere cannot leave them half-updated and poisoning is ignored.
    pub(crate) fn state(&self) -> MutexGuard<'_, CrawlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Crawls up to `max_pages` pending pages and returns the images first seen in this call
    ///
    /// Each iteration pops one arbitrary pending page, fetches it, queues its
    /// unexplored same-site links and, when the page URL matches the page
    /// filter, folds its images into the discovered set. The loop also stops
    /// when no page is pending.
    ///
    /// # Errors
    ///
    /// A failed page fetch aborts the call. Pages finished before the failure
    /// stay explored and their images stay discovered; the failing page goes
    /// back to the pending set so the next call retries it.
    pub async fn scrape(&self, max_pages: usize) -> Result<HashSet<String>, HarvestError> {
        if max_pages == 0 {
            return Err(HarvestError::InvalidArgument(
                "max_pages must be at least 1".to_string(),
            ));
        }

        let mut new_images = HashSet::new();
        let mut pages = 0;

        while pages < max_pages {
            let Some(url) = self.state().frontier.pop_unexplored() else {
                tracing::debug!("No pages left to explore");
                break;
            };

            tracing::info!("Processing page: {}", url);

            match self.process_page(&url).await {
                Ok(images) => new_images.extend(images),
                Err(e) => {
                    self.state().frontier.release(&url);
                    return Err(e);
                }
            }

            pages += 1;
        }

        tracing::debug!(
            "Scrape finished: {} pages processed, {} new images",
            pages,
            new_images.len()
        );

        Ok(new_images)
    }

    /// Fetches one claimed page and folds its links and images into the state
    ///
    /// Returns the images that were not in the discovered set before.
    async fn process_page(&self, url: &str) -> Result<HashSet<String>, HarvestError> {
        let html = fetch_page(&self.client, url).await?;
        let document = parse_page(&html);
        let collect_images = self.page_filter.is_match(url);

        let mut state = self.state();

        let links = extract_links(
            &document,
            state.root(),
            state.seed(),
            state.frontier.explored(),
        );
        let images = if collect_images {
            extract_image_urls(&document, state.root(), &self.image_filter)
        } else {
            HashSet::new()
        };

        let queued = state.frontier.extend_unexplored(links);
        let new_images = state.frontier.absorb_images(images);
        state.frontier.mark_explored(url);

        tracing::debug!(
            "{}: {} new links queued, {} new images",
            url,
            queued,
            new_images.len()
        );

        Ok(new_images)
    }

    /// Returns the configuration this harvester was built with
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Returns `scheme://host[:port]` of the seed
    pub fn root(&self) -> String {
        self.state().root().to_string()
    }

    /// Snapshot of the pages already fetched
    pub fn explored(&self) -> HashSet<String> {
        self.state().frontier.explored().clone()
    }

    /// Snapshot of the pages waiting to be fetched
    pub fn unexplored(&self) -> HashSet<String> {
        self.state().frontier.unexplored().clone()
    }

    /// Snapshot of every image URL discovered so far
    pub fn discovered_images(&self) -> HashSet<String> {
        self.state().frontier.discovered_images().clone()
    }

    /// Snapshot of the images whose download attempt completed
    pub fn downloaded(&self) -> HashSet<String> {
        self.state().ledger.downloaded().clone()
    }

    /// Index the next saved image will receive
    pub fn download_index(&self) -> u64 {
        self.state().ledger.next_index()
    }

    /// Current harvest statistics
    pub fn stats(&self) -> HarvestStats {
        HarvestStats::from_state(&self.state())
    }
}

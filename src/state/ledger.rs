//! Download bookkeeping
//!
//! Tracks which discovered images have had their one download attempt and
//! hands out the 1-based save index used for numeric names and folder
//! boundaries.

use std::collections::HashSet;

/// Record of completed download attempts and saved images
#[derive(Debug, Clone)]
pub struct DownloadLedger {
    /// Image URLs whose fetch and decode completed, saved or not
    downloaded: HashSet<String>,

    /// Image URLs claimed by a download that has not finished yet
    in_flight: HashSet<String>,

    /// Index the next saved image will receive
    next_index: u64,

    /// Indices below `next_index` whose write failed and could not be rewound
    abandoned: u64,
}

impl Default for DownloadLedger {
    fn default() -> Self {
        Self {
            downloaded: HashSet::new(),
            in_flight: HashSet::new(),
            next_index: 1,
            abandoned: 0,
        }
    }
}

impl DownloadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims an arbitrary discovered image that has not been attempted yet
    pub fn claim_next(&mut self, discovered: &HashSet<String>) -> Option<String> {
        let url = discovered
            .iter()
            .find(|url| !self.downloaded.contains(*url) && !self.in_flight.contains(*url))
            .cloned()?;
        self.in_flight.insert(url.clone());
        Some(url)
    }

    /// Number of discovered images still waiting for an attempt
    pub fn pending(&self, discovered: &HashSet<String>) -> usize {
        discovered
            .iter()
            .filter(|url| !self.downloaded.contains(*url) && !self.in_flight.contains(*url))
            .count()
    }

    /// Records that an image's one attempt happened; it is never offered again
    pub fn mark_downloaded(&mut self, url: &str) {
        self.in_flight.remove(url);
        self.downloaded.insert(url.to_string());
    }

    /// Returns a failed claim so a later download can try again
    pub fn release(&mut self, url: &str) {
        self.in_flight.remove(url);
    }

    /// Returns the current save index and advances it
    pub fn allocate_index(&mut self) -> u64 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }

    /// Takes back an index whose image could not be written
    ///
    /// When `index` is still the latest one handed out the counter is rewound,
    /// so the next save reuses it. Otherwise a later save already holds a
    /// higher index and this one is left as a gap that does not count as saved.
    pub fn reclaim_index(&mut self, index: u64) {
        if index + 1 == self.next_index {
            self.next_index = index;
        } else {
            self.abandoned += 1;
        }
    }

    /// Index the next saved image will receive
    pub fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Number of images saved so far
    pub fn saved(&self) -> u64 {
        self.next_index - 1 - self.abandoned
    }

    pub fn is_downloaded(&self, url: &str) -> bool {
        self.downloaded.contains(url)
    }

    pub fn downloaded(&self) -> &HashSet<String> {
        &self.downloaded
    }
}

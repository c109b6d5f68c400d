//! Page frontier and discovered-image set
//!
//! Every set here only grows, apart from the hand-off of a URL between
//! `unexplored`, `in_flight` and `explored`. A page URL is in at most one of
//! those three sets at any time.

use std::collections::HashSet;

/// Crawl frontier for a single site
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    /// Pages already fetched and processed
    explored: HashSet<String>,

    /// Pages waiting to be fetched
    unexplored: HashSet<String>,

    /// Pages popped by a crawl that has not finished with them yet
    in_flight: HashSet<String>,

    /// Image URLs accepted by the image filter, across all crawl calls
    discovered_images: HashSet<String>,
}

impl Frontier {
    /// Creates a frontier whose only pending page is the seed
    pub fn new(seed: &str) -> Self {
        let mut unexplored = HashSet::new();
        unexplored.insert(seed.to_string());
        Self {
            unexplored,
            ..Self::default()
        }
    }

    /// Takes an arbitrary pending page and marks it in flight
    ///
    /// No ordering is promised: this is a set pop, not a queue.
    pub fn pop_unexplored(&mut self) -> Option<String> {
        let url = self.unexplored.iter().next().cloned()?;
        self.unexplored.remove(&url);
        self.in_flight.insert(url.clone());
        Some(url)
    }

    /// Records that an in-flight page was fully processed
    pub fn mark_explored(&mut self, url: &str) {
        self.in_flight.remove(url);
        self.unexplored.remove(url);
        self.explored.insert(url.to_string());
    }

    /// Hands an in-flight page back to the pending set after a failure
    pub fn release(&mut self, url: &str) {
        if self.in_flight.remove(url) && !self.explored.contains(url) {
            self.unexplored.insert(url.to_string());
        }
    }

    /// Adds page links to the pending set
    ///
    /// Links that are explored or in flight are ignored; links already
    /// pending are a no-op. Returns how many links were new.
    pub fn extend_unexplored<I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for link in links {
            if self.explored.contains(&link) || self.in_flight.contains(&link) {
                continue;
            }
            if self.unexplored.insert(link) {
                added += 1;
            }
        }
        added
    }

    /// Folds image URLs into the discovered set and returns the ones not seen before
    pub fn absorb_images<I>(&mut self, images: I) -> HashSet<String>
    where
        I: IntoIterator<Item = String>,
    {
        images
            .into_iter()
            .filter(|image| self.discovered_images.insert(image.clone()))
            .collect()
    }

    pub fn is_explored(&self, url: &str) -> bool {
        self.explored.contains(url)
    }

    pub fn is_unexplored(&self, url: &str) -> bool {
        self.unexplored.contains(url)
    }

    pub fn has_pending(&self) -> bool {
        !self.unexplored.is_empty()
    }

    pub fn explored(&self) -> &HashSet<String> {
        &self.explored
    }

    pub fn unexplored(&self) -> &HashSet<String> {
        &self.unexplored
    }

    pub fn discovered_images(&self) -> &HashSet<String> {
        &self.discovered_images
    }
}

//! Harvest statistics
//!
//! This module snapshots the crawl state into counters and prints them.

use crate::state::CrawlState;

/// Harvest statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestStats {
    /// Pages fetched and processed
    pub pages_explored: u64,

    /// Pages still waiting to be fetched
    pub pages_pending: u64,

    /// Image URLs accepted by the image filter
    pub images_discovered: u64,

    /// Images whose single download attempt completed
    pub images_attempted: u64,

    /// Images written to disk
    pub images_saved: u64,

    /// Images rejected by the size thresholds
    pub images_skipped: u64,

    /// Discovered images not attempted yet
    pub images_pending: u64,
}

impl HarvestStats {
    /// Builds statistics from the current crawl state
    pub fn from_state(state: &CrawlState) -> Self {
        let images_attempted = state.ledger.downloaded().len() as u64;
        let images_saved = state.ledger.saved();

        Self {
            pages_explored: state.frontier.explored().len() as u64,
            pages_pending: state.frontier.unexplored().len() as u64,
            images_discovered: state.frontier.discovered_images().len() as u64,
            images_attempted,
            images_saved,
            images_skipped: images_attempted.saturating_sub(images_saved),
            images_pending: state.pending_images() as u64,
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStats) {
    println!("=== Harvest Statistics ===\n");

    println!("Pages:");
    println!("  Explored: {}", stats.pages_explored);
    println!("  Pending: {}", stats.pages_pending);
    println!();

    println!("Images:");
    println!("  Discovered: {}", stats.images_discovered);
    println!("  Attempted: {}", stats.images_attempted);
    println!("  Saved: {}", stats.images_saved);
    println!("  Skipped (too small): {}", stats.images_skipped);
    println!("  Not yet attempted: {}", stats.images_pending);
    println!();

    let save_rate = if stats.images_attempted > 0 {
        (stats.images_saved as f64 / stats.images_attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Save Rate: {:.1}% ({} / {} attempted images saved)",
        save_rate, stats.images_saved, stats.images_attempted
    );
}

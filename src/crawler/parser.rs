//! HTML extraction of page links and image sources
//!
//! Both extractors are pure: they read a parsed document plus the site's
//! seed/root and return a set, without touching crawl state or the network.

use crate::url::{is_fetchable, resolve_against_root, same_origin};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Suffix of animated images, which are never collected
const ANIMATED_SUFFIX: &str = ".gif";

/// Parses an HTML page into a navigable document
pub fn parse_page(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts same-site page links that have not been explored yet
///
/// # Link Extraction Rules
///
/// - Every `<a href="...">` is considered
/// - `href` values starting with `/` are prefixed with the root origin
/// - A link is kept only if its scheme, host and port match the seed's
/// - Links in `explored` are dropped; links already pending may come back,
///   inserting them again is a no-op
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
/// use image_harvester::crawler::{extract_links, parse_page};
/// use url::Url;
///
/// let seed = Url::parse("https://example.com/").unwrap();
/// let page = parse_page(r#"<a href="/about">About</a><a href="https://other.com/">Other</a>"#);
/// let links = extract_links(&page, "https://example.com", &seed, &HashSet::new());
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://example.com/about"));
/// ```
pub fn extract_links(
    document: &Html,
    root: &str,
    seed: &Url,
    explored: &HashSet<String>,
) -> HashSet<String> {
    let mut links = HashSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let link = resolve_against_root(href, root);
        if !same_origin(&link, seed) {
            tracing::trace!("Ignoring off-site link: {}", link);
            continue;
        }
        if explored.contains(&link) {
            continue;
        }
        links.insert(link);
    }

    links
}

/// Extracts candidate image URLs that match the image filter
///
/// # Image Extraction Rules
///
/// - Every `<img src="...">` is considered
/// - Sources ending in `.gif` are skipped before anything else
/// - `src` values starting with `/` are prefixed with the root origin
/// - Sources that are still not absolute HTTP(S) URLs are dropped
/// - The filter is searched for anywhere in the URL (not a full match)
///
/// Images may live on any host; only pages are restricted to the seed's site.
pub fn extract_image_urls(document: &Html, root: &str, filter: &Regex) -> HashSet<String> {
    let mut images = HashSet::new();

    let Ok(selector) = Selector::parse("img[src]") else {
        return images;
    };

    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        if src.is_empty() || src.ends_with(ANIMATED_SUFFIX) {
            continue;
        }

        let image = resolve_against_root(src, root);
        if !is_fetchable(&image) {
            tracing::debug!("Ignoring image source that cannot be fetched: {}", src);
            continue;
        }
        if filter.is_match(&image) {
            images.insert(image);
        }
    }

    images
}

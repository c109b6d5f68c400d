use url::Url;

/// Resolves a root-relative reference against the site's root origin
///
/// References starting with `/` are appended to `root`; anything else is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use image_harvester::url::resolve_against_root;
///
/// let root = "https://example.com";
/// assert_eq!(resolve_against_root("/img/a.png", root), "https://example.com/img/a.png");
/// assert_eq!(resolve_against_root("https://cdn.com/a.png", root), "https://cdn.com/a.png");
/// assert_eq!(resolve_against_root("a.png", root), "a.png");
/// ```
pub fn resolve_against_root(raw: &str, root: &str) -> String {
    if raw.starts_with('/') {
        format!("{}{}", root, raw)
    } else {
        raw.to_string()
    }
}

/// Returns true if the string is an absolute HTTP(S) URL the fetcher can request
pub fn is_fetchable(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| url.scheme() == "http" || url.scheme() == "https")
        .unwrap_or(false)
}

/// Returns everything after the last `/` of a URL string
///
/// Query strings are part of the segment, as they are part of the raw URL.
pub fn last_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

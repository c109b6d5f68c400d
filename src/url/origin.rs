use crate::{UrlError, UrlResult};
use url::Url;

/// Parses the seed URL, requiring an absolute HTTP(S) URL with a host
///
/// # Examples
///
/// ```
/// use image_harvester::url::parse_seed;
///
/// assert!(parse_seed("https://example.com/start").is_ok());
/// assert!(parse_seed("/start").is_err());
/// assert!(parse_seed("ftp://example.com/").is_err());
/// ```
pub fn parse_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns `scheme://host[:port]` for a URL
///
/// The port is only included when the URL spells out a non-default one.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use image_harvester::url::root_origin;
///
/// let url = Url::parse("https://example.com/a/b?c=d").unwrap();
/// assert_eq!(root_origin(&url), "https://example.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(root_origin(&url), "http://127.0.0.1:8080");
/// ```
pub fn root_origin(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    }
}

/// Checks whether `candidate` lives on the same origin (scheme, host, port) as `seed`
///
/// Strings that do not parse as absolute URLs are never same-origin.
pub fn same_origin(candidate: &str, seed: &Url) -> bool {
    match Url::parse(candidate) {
        Ok(url) => url.origin() == seed.origin(),
        Err(_) => false,
    }
}

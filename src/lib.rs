//! Image-Harvester: a selective image crawler for a single website
//!
//! This crate walks the pages of one site starting from a seed URL, collects the
//! image URLs that pass the configured filters and saves the ones that meet the
//! size thresholds under a flat or grouped folder layout.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harvesting operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("HTTP error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode image {url}: {source}")]
    Decode {
        url: String,
        source: image::ImageError,
    },

    #[error("Filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to save image to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No image format known for {}", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("Image task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl HarvestError {
    /// Returns the page or image URL the error is about, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Fetch { url, .. } | Self::HttpStatus { url, .. } | Self::Decode { url, .. } => {
                Some(url)
            }
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        source: regex::Error,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for harvesting operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{HarvestConfig, Naming, Structure};
pub use crawler::Harvester;
pub use output::HarvestStats;
pub use state::{CrawlState, DownloadLedger, Frontier};

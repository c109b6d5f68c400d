use serde::Deserialize;
use std::fmt;

/// Default number of images grouped into one sub-folder
pub const DEFAULT_IMAGES_PER_FOLDER: u32 = 100;

/// Default number given to the first sub-folder
pub const DEFAULT_FOLDER_INITIAL_NUM: u32 = 1;

/// Default output folder
pub const DEFAULT_OUTPUT_FOLDER: &str = "scraped";

/// Main configuration structure for Image-Harvester
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestConfig {
    /// The URL the crawl starts from; also fixes the site's origin
    pub seed: String,

    /// Only pages whose URL matches this regex contribute images.
    /// Non-matching pages are still followed for links.
    #[serde(rename = "regex-pages", default)]
    pub regex_pages: String,

    /// Only image URLs matching this regex are collected
    #[serde(rename = "regex-images", default)]
    pub regex_images: String,

    /// Minimum decoded width for an image to be saved
    #[serde(rename = "min-width", default)]
    pub min_width: u32,

    /// Minimum decoded height for an image to be saved
    #[serde(rename = "min-height", default)]
    pub min_height: u32,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub fetch: FetchConfig,
}

impl HarvestConfig {
    /// Creates a configuration for `seed` with every other setting at its default
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            regex_pages: String::new(),
            regex_images: String::new(),
            min_width: 0,
            min_height: 0,
            output: OutputConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Output layout and naming configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root folder that receives the images
    #[serde(default = "default_folder")]
    pub folder: String,

    #[serde(default)]
    pub structure: Structure,

    #[serde(default)]
    pub naming: Naming,

    /// Images per sub-folder when `structure` is grouped
    #[serde(rename = "images-per-folder", default = "default_images_per_folder")]
    pub images_per_folder: u32,

    /// Number of the first sub-folder when `structure` is grouped
    #[serde(rename = "folder-initial-num", default = "default_folder_initial_num")]
    pub folder_initial_num: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            structure: Structure::default(),
            naming: Naming::default(),
            images_per_folder: DEFAULT_IMAGES_PER_FOLDER,
            folder_initial_num: DEFAULT_FOLDER_INITIAL_NUM,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// How saved images are spread over folders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Structure {
    /// Every image goes straight into the output folder
    #[default]
    Flat,
    /// Images are grouped into zero-padded numbered sub-folders
    Grouped,
}

/// How saved images are named
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
pub enum Naming {
    /// Last path segment of the image URL
    #[default]
    #[serde(rename = "keep", alias = "keep-original")]
    #[value(name = "keep", alias = "keep-original")]
    Keep,
    /// `1.jpg`, `2.jpg`, ... in save order
    #[serde(rename = "numerical", alias = "sequential-numeric")]
    #[value(name = "numerical", alias = "sequential-numeric")]
    Numerical,
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "flat"),
            Self::Grouped => write!(f, "grouped"),
        }
    }
}

impl fmt::Display for Naming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Numerical => write!(f, "numerical"),
        }
    }
}

fn default_folder() -> String {
    DEFAULT_OUTPUT_FOLDER.to_string()
}

fn default_images_per_folder() -> u32 {
    DEFAULT_IMAGES_PER_FOLDER
}

fn default_folder_initial_num() -> u32 {
    DEFAULT_FOLDER_INITIAL_NUM
}

fn default_user_agent() -> String {
    format!("image-harvester/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

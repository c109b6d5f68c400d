//! Image-Harvester main entry point
//!
//! This is the command-line interface for the Image-Harvester crawler.

use anyhow::Context;
use clap::Parser;
use image_harvester::config::{
    load_config_with_hash, validate, HarvestConfig, Naming, Structure, DEFAULT_FOLDER_INITIAL_NUM,
    DEFAULT_IMAGES_PER_FOLDER, DEFAULT_OUTPUT_FOLDER,
};
use image_harvester::output::print_statistics;
use image_harvester::Harvester;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_MAX_PAGES: usize = 99_999;
const DEFAULT_HOW_MANY: usize = 99_999;

/// Image-Harvester: download a filtered selection of images from one website
///
/// Starting from the seed, every reachable page of the same site is visited
/// and the images of pages matching the page filter are collected. Images
/// that match the image filter and meet the minimum size are saved.
#[derive(Parser, Debug)]
#[command(name = "image-harvester")]
#[command(version)]
#[command(about = "Download a filtered selection of images from one website", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(short, long, required_unless_present = "config")]
    seed: Option<String>,

    /// Load the site settings from a TOML file instead of the flags below
    #[arg(short, long, value_name = "FILE", conflicts_with = "seed")]
    config: Option<PathBuf>,

    /// Only pages matching this regex contribute images (links are always followed)
    #[arg(long, default_value = "")]
    regex_pages: String,

    /// Only image URLs matching this regex are collected
    #[arg(long, default_value = "")]
    regex_images: String,

    /// Minimum width for an image to be saved
    #[arg(long, default_value_t = 0)]
    min_width: u32,

    /// Minimum height for an image to be saved
    #[arg(long, default_value_t = 0)]
    min_height: u32,

    /// Folder to save images into
    #[arg(long, default_value = DEFAULT_OUTPUT_FOLDER)]
    output_folder: String,

    /// Put every image in one folder, or group them into numbered sub-folders
    #[arg(long, value_enum, default_value_t = Structure::Flat)]
    output_structure: Structure,

    /// Keep the original file names, or number the images in save order
    #[arg(long, value_enum, default_value_t = Naming::Keep)]
    output_naming: Naming,

    /// Images per sub-folder with the grouped structure
    #[arg(long, default_value_t = DEFAULT_IMAGES_PER_FOLDER)]
    images_per_folder: u32,

    /// Number of the first sub-folder with the grouped structure
    #[arg(long, default_value_t = DEFAULT_FOLDER_INITIAL_NUM)]
    folder_initial_num: u32,

    /// Maximum number of pages to crawl
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Maximum number of images to attempt
    #[arg(long, default_value_t = DEFAULT_HOW_MANY)]
    how_many: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate the settings and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    /// Builds the harvest configuration from the flags or the config file
    ///
    /// Also returns the SHA-256 of the config file, when one was used.
    fn harvest_config(&self) -> anyhow::Result<(HarvestConfig, Option<String>)> {
        if let Some(path) = &self.config {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            return Ok((config, Some(hash)));
        }

        let seed = self
            .seed
            .clone()
            .context("either --seed or --config is required")?;

        let mut config = HarvestConfig::new(seed);
        config.regex_pages = self.regex_pages.clone();
        config.regex_images = self.regex_images.clone();
        config.min_width = self.min_width;
        config.min_height = self.min_height;
        config.output.folder = self.output_folder.clone();
        config.output.structure = self.output_structure;
        config.output.naming = self.output_naming;
        config.output.images_per_folder = self.images_per_folder;
        config.output.folder_initial_num = self.folder_initial_num;

        validate(&config)?;
        Ok((config, None))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = cli.harvest_config().map_err(|e| {
        tracing::error!("Invalid configuration: {:#}", e);
        e
    })?;

    if cli.dry_run {
        handle_dry_run(&config, config_hash.as_deref(), cli.max_pages, cli.how_many);
        return Ok(());
    }

    handle_harvest(config, cli.max_pages, cli.how_many).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("image_harvester=info,warn"),
            1 => EnvFilter::new("image_harvester=debug,info"),
            2 => EnvFilter::new("image_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the validated settings
fn handle_dry_run(
    config: &HarvestConfig,
    config_hash: Option<&str>,
    max_pages: usize,
    how_many: usize,
) {
    println!("=== Image-Harvester Dry Run ===\n");

    if let Some(hash) = config_hash {
        println!("Config file SHA-256: {}\n", hash);
    }

    println!("Crawl:");
    println!("  Seed: {}", config.seed);
    println!("  Page filter: {:?}", config.regex_pages);
    println!("  Image filter: {:?}", config.regex_images);
    println!("  Max pages: {}", max_pages);

    println!("\nDownload:");
    println!("  Minimum size: {}x{}", config.min_width, config.min_height);
    println!("  Max images: {}", how_many);

    println!("\nOutput:");
    println!("  Folder: {}", config.output.folder);
    println!("  Structure: {}", config.output.structure);
    println!("  Naming: {}", config.output.naming);
    if config.output.structure == Structure::Grouped {
        println!("  Images per folder: {}", config.output.images_per_folder);
        println!("  First folder number: {}", config.output.folder_initial_num);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main harvest: crawl, then download, then report
async fn handle_harvest(
    config: HarvestConfig,
    max_pages: usize,
    how_many: usize,
) -> anyhow::Result<()> {
    let harvester = Harvester::new(config)?;

    let result = async {
        let found = harvester.scrape(max_pages).await?;
        tracing::info!("Discovered {} new images", found.len());
        harvester.download(how_many).await
    }
    .await;

    print_statistics(&harvester.stats());

    match result {
        Ok(()) => {
            tracing::info!("Harvest completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

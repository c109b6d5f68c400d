//! Configuration module for Image-Harvester
//!
//! This module handles building, loading and validating harvest configurations.
//! A configuration can be assembled in code or read from a TOML file.
//!
//! # Example
//!
//! ```no_run
//! use image_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting from: {}", config.seed);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    FetchConfig, HarvestConfig, Naming, OutputConfig, Structure, DEFAULT_FOLDER_INITIAL_NUM,
    DEFAULT_IMAGES_PER_FOLDER, DEFAULT_OUTPUT_FOLDER,
};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{compile_filter, validate};

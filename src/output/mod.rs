//! Output module for placing and saving images
//!
//! This module handles:
//! - Naming saved images and spreading them over folders
//! - Encoding and writing images to disk
//! - Reporting harvest statistics

mod layout;
pub mod stats;
mod writer;

pub use layout::{file_name, folder_name, placement, Placement, FOLDER_NAME_WIDTH};
pub use stats::{print_statistics, HarvestStats};
pub use writer::{ensure_dir, save_image};

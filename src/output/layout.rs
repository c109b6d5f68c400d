//! Naming and folder layout of saved images
//!
//! Everything here is a pure function of the output settings, the image URL
//! and the save index, so the placement of the Nth saved image never depends
//! on how many images were skipped before it.

use crate::config::{Naming, OutputConfig, Structure};
use crate::url::last_segment;
use std::path::{Path, PathBuf};

/// Width that folder numbers are zero-padded to
pub const FOLDER_NAME_WIDTH: usize = 4;

/// Where a saved image goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Sub-folder to create first, if the layout uses one
    pub folder: Option<PathBuf>,

    /// Full destination path of the image file
    pub path: PathBuf,
}

/// Returns the file name for the image saved with `index`
///
/// `Keep` uses the last `/`-separated segment of the raw URL and falls back to
/// the numeric name when that segment is empty. `Numerical` always uses a
/// `.jpg` extension whatever the source format was.
pub fn file_name(naming: Naming, url: &str, index: u64) -> String {
    match naming {
        Naming::Keep => {
            let segment = last_segment(url);
            if segment.is_empty() {
                numeric_name(index)
            } else {
                segment.to_string()
            }
        }
        Naming::Numerical => numeric_name(index),
    }
}

fn numeric_name(index: u64) -> String {
    format!("{}.jpg", index)
}

/// Returns the zero-padded sub-folder name for the image saved with `index`
///
/// # Example
///
/// ```
/// use image_harvester::output::folder_name;
///
/// assert_eq!(folder_name(1, 100, 1), "0001");
/// assert_eq!(folder_name(100, 100, 1), "0001");
/// assert_eq!(folder_name(101, 100, 1), "0002");
/// assert_eq!(folder_name(1, 10, 7), "0007");
/// ```
pub fn folder_name(index: u64, images_per_folder: u32, folder_initial_num: u32) -> String {
    let number = (index - 1) / u64::from(images_per_folder) + u64::from(folder_initial_num);
    format!("{:0width$}", number, width = FOLDER_NAME_WIDTH)
}

/// Computes where the image saved with `index` is written
pub fn placement(output: &OutputConfig, url: &str, index: u64) -> Placement {
    let name = file_name(output.naming, url, index);
    let root = Path::new(&output.folder);

    match output.structure {
        Structure::Flat => Placement {
            folder: None,
            path: root.join(name),
        },
        Structure::Grouped => {
            let folder = root.join(folder_name(
                index,
                output.images_per_folder,
                output.folder_initial_num,
            ));
            Placement {
                path: folder.join(name),
                folder: Some(folder),
            }
        }
    }
}

use crate::HarvestError;
use image::{ColorType, DynamicImage, ImageFormat};
use std::path::Path;

/// Creates a directory and its parents; an existing directory is fine
pub fn ensure_dir(path: &Path) -> Result<(), HarvestError> {
    std::fs::create_dir_all(path).map_err(|source| HarvestError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes and writes a decoded image, replacing any existing file
///
/// The encoder is chosen from the destination's extension. When the
/// extension is missing or unknown the image keeps the format it was
/// downloaded in. JPEG only takes 8-bit gray or RGB, so anything else is
/// converted to 8-bit RGB first.
pub fn save_image(
    image: &DynamicImage,
    path: &Path,
    source_format: Option<ImageFormat>,
) -> Result<(), HarvestError> {
    let format = ImageFormat::from_path(path)
        .ok()
        .or(source_format)
        .ok_or_else(|| HarvestError::UnknownFormat {
            path: path.to_path_buf(),
        })?;

    let result = if format == ImageFormat::Jpeg && !jpeg_compatible(image.color()) {
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)
    } else {
        image.save_with_format(path, format)
    };

    result.map_err(|source| HarvestError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn jpeg_compatible(color: ColorType) -> bool {
    matches!(color, ColorType::L8 | ColorType::Rgb8)
}

use std::path::Path;

use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::image::Image;

/// Whether the path carries a supported image extension.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode an image file into the normalized [0,1] representation.
pub fn read_image(path: &Path) -> Result<Image, Box<dyn std::error::Error>> {
    let decoded = image::open(path)?;
    Ok(Image::from_rgb8(&decoded.to_rgb8()))
}

/// Encode and write an image; format follows the output extension.
pub fn write_image(path: &Path, img: &Image) -> Result<(), Box<dyn std::error::Error>> {
    img.to_rgb8().save(path)?;
    Ok(())
}

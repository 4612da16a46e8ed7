//! Raster to column conversion
//!
//! Both the reference atlas and every glyph asset are compared column by
//! column, so images are decoded once and stored as a list of columns.

use anyhow::{Context, Result};
use image::io::Reader as ImageReader;
use image::RgbImage;
use log::debug;
use std::path::Path;

/// One RGB pixel
pub type Rgb = [u8; 3];

/// One vertical strip of pixels, top to bottom
pub type Column = Vec<Rgb>;

/// Split an RGB image into its columns, left to right
pub fn columns_from_image(img: &RgbImage) -> Vec<Column> {
    let (width, height) = img.dimensions();
    (0..width)
        .map(|x| (0..height).map(|y| img.get_pixel(x, y).0).collect())
        .collect()
}

/// Decode an image file (PNG or GIF) and split it into columns
///
/// Palette and alpha images are flattened to RGB first, so two files with
/// the same visible pixels produce identical columns.
pub fn columns_from_path(path: &Path) -> Result<Vec<Column>> {
    let reader = ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Unknown image format: {}", path.display()))?;

    let img = reader
        .decode()
        .with_context(|| format!("Failed to decode image: {}", path.display()))?
        .to_rgb8();

    debug!(
        "Decoded {}: {}x{}",
        path.display(),
        img.width(),
        img.height()
    );

    Ok(columns_from_image(&img))
}

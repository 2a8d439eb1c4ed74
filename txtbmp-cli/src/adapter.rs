//! Image file loading and saving for pixel grids.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::{ImageFormat, RgbImage};
use txtbmp::PixelGrid;

/// Formats that store RGB8 exactly.
const LOSSLESS: &[ImageFormat] = &[ImageFormat::Bmp, ImageFormat::Png];

/// Load any supported image as an RGB pixel grid. Alpha is discarded.
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let img = image::open(path)
        .with_context(|| format!("failed to open image: {}", path.display()))?
        .into_rgb8();

    let (width, height) = img.dimensions();
    PixelGrid::from_rgb_bytes(width, height, img.into_raw())
        .with_context(|| format!("building pixel grid from {}", path.display()))
}

/// Save a grid as a lossless image, format chosen from the file extension.
pub fn save_grid(grid: PixelGrid, path: &Path) -> Result<()> {
    let format = lossless_format(path)?;
    let (width, height) = (grid.width(), grid.height());
    let img = RgbImage::from_raw(width, height, grid.into_rgb_bytes())
        .context("pixel buffer does not match grid dimensions")?;
    img.save_with_format(path, format)
        .with_context(|| format!("writing {}", path.display()))
}

fn lossless_format(path: &Path) -> Result<ImageFormat> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("cannot infer image format from {}", path.display()))?;
    if !LOSSLESS.contains(&format) {
        bail!(
            "{:?} is lossy or unsupported; use a .bmp or .png output path",
            format
        );
    }
    Ok(format)
}

//! PNG loading of exemplars and export of rendered grids

use crate::io::error::{Result, SolverError};
use crate::spatial::grid::{OutputGrid, Rgba};
use image::{ImageBuffer, RgbaImage};
use ndarray::Array2;
use std::path::Path;

/// Load an image as an RGBA color grid indexed `[row, column]`
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_exemplar(path: &Path) -> Result<Array2<Rgba>> {
    let img = image::open(path).map_err(|e| SolverError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image_to_colors(&img.to_rgba8()))
}

/// Convert a decoded image into a color grid indexed `[row, column]`
pub fn image_to_colors(img: &RgbaImage) -> Array2<Rgba> {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        img.get_pixel_checked(col as u32, row as u32)
            .map_or([0, 0, 0, 0], |pixel| pixel.0)
    })
}

/// Build an image with one pixel per rendered cell
///
/// Masked cells take the reserved mask color.
pub fn grid_to_image(grid: &OutputGrid) -> RgbaImage {
    let width = grid.width() as u32;
    let height = grid.height() as u32;
    ImageBuffer::from_fn(width, height, |x, y| {
        let color = grid
            .get(x as usize, y as usize)
            .map_or([0, 0, 0, 0], |cell| cell.to_rgba());
        image::Rgba(color)
    })
}

/// Export a rendered grid as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &OutputGrid, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| SolverError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    grid_to_image(grid)
        .save(output_path)
        .map_err(|e| SolverError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

//! Source image loading and flat-color preview export

use image::{ImageBuffer, Rgba};
use std::path::Path;

use crate::io::error::{Result, TileMapError};
use crate::palette::candidates::{CandidateCatalog, CandidateKind};
use crate::spatial::grid::ConversionResult;
use crate::spatial::sampling::SourceImage;

/// Load any supported image format as an RGBA source image
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or has no pixels
pub fn load_source_image(path: &Path) -> Result<SourceImage> {
    let decoded = image::open(path).map_err(|e| TileMapError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    SourceImage::from_rgba_image(&decoded.to_rgba8())
}

// Tiles cover walls; cells with neither stay transparent
fn preview_color(catalog: &CandidateCatalog, tile: u16, wall: u16) -> Rgba<u8> {
    let color = catalog
        .color(CandidateKind::Tile, tile)
        .or_else(|| catalog.color(CandidateKind::Wall, wall));

    color.map_or(Rgba([0, 0, 0, 0]), |[r, g, b]| Rgba([r, g, b, 255]))
}

/// Render a conversion result as one pixel per cell
///
/// # Errors
///
/// Returns an error if the grid does not fit an image
pub fn render_preview(
    result: &ConversionResult,
    catalog: &CandidateCatalog,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    let width = u32::try_from(result.width()).map_err(|e| TileMapError::InvalidSourceData {
        reason: format!("grid width {} does not fit an image: {e}", result.width()),
    })?;
    let height = u32::try_from(result.height()).map_err(|e| TileMapError::InvalidSourceData {
        reason: format!("grid height {} does not fit an image: {e}", result.height()),
    })?;

    let mut img = ImageBuffer::new(width, height);
    for ((y, x), &tile) in result.tiles().indexed_iter() {
        let wall = result.walls().get([y, x]).copied().unwrap_or(u16::MAX);
        img.put_pixel(x as u32, y as u32, preview_color(catalog, tile, wall));
    }

    Ok(img)
}

/// Export a conversion result as a PNG preview
///
/// # Errors
///
/// Returns an error if:
/// - The grid does not fit an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(
    result: &ConversionResult,
    catalog: &CandidateCatalog,
    output_path: &Path,
) -> Result<()> {
    let img = render_preview(result, catalog)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| TileMapError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| TileMapError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    tracing::info!(path = %output_path.display(), "preview written");
    Ok(())
}

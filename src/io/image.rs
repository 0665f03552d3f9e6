//! PNG export of a finished tilemap

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::tilemap::Tilemap;
use crate::spatial::TileCatalog;
use image::{ImageBuffer, Rgba};
use std::path::Path;

// Golden-angle hue steps keep neighboring indices visually distinct
const FALLBACK_HUE_STEP: f64 = 137.507_764;

/// Color for a tile: its configured color, or a stable fallback derived from
/// its index
pub fn tile_color(catalog: &TileCatalog, tile: usize) -> [u8; 4] {
    catalog
        .get(tile)
        .and_then(|rule| rule.color)
        .unwrap_or_else(|| fallback_color(tile))
}

fn fallback_color(tile: usize) -> [u8; 4] {
    let hue = (tile as f64 * FALLBACK_HUE_STEP) % 360.0;
    let [r, g, b] = hsv_to_rgb(hue, 0.6, 0.9);
    [r, g, b, 255]
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - ((sector % 2.0) - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = value - chroma;
    let to_byte = |channel: f64| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// Render a tilemap with `scale × scale` pixels per cell
///
/// # Errors
///
/// Returns an error if the scale is zero or the image would be too large
pub fn render_tilemap(
    tilemap: &Tilemap,
    catalog: &TileCatalog,
    scale: u32,
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be positive"));
    }

    let too_large = || invalid_parameter("scale", &scale, &"rendered image exceeds u32 pixels");
    let width = u32::try_from(tilemap.width())
        .ok()
        .and_then(|w| w.checked_mul(scale))
        .ok_or_else(too_large)?;
    let height = u32::try_from(tilemap.height())
        .ok()
        .and_then(|h| h.checked_mul(scale))
        .ok_or_else(too_large)?;

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let x = (px / scale) as usize;
        let y = (py / scale) as usize;
        let color = tilemap
            .tile(x, y)
            .map_or([0, 0, 0, 0], |tile| tile_color(catalog, tile));
        Rgba(color)
    }))
}

/// Render and save a tilemap as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The scale is zero or the image would be too large
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tilemap_as_png(
    tilemap: &Tilemap,
    catalog: &TileCatalog,
    output_path: &Path,
    scale: u32,
) -> Result<()> {
    let img = render_tilemap(tilemap, catalog, scale)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

use std::path::Path;

use image::imageops;
use image::{Rgba, RgbaImage};

use crate::encode::QrRaster;
use crate::error::{EmblemError, EmblemResult};

// Emblem overlay
//------------------------------------------------------------------------------

/// Alpha-blends the emblem onto the symbol center. The emblem's transparent
/// corners leave the modules beneath them untouched.
pub fn overlay_emblem(qr: &mut QrRaster, emblem: &RgbaImage) {
    let x = (qr.pixel_width() - emblem.width()) as i64 / 2;
    let y = (qr.pixel_width() - emblem.height()) as i64 / 2;
    imageops::overlay(&mut qr.image, emblem, x, y);
}

/// Fraction of the data area (in module units, quiet zone excluded) obscured
/// by the emblem's circumscribing square, in percent. Advisory: level H
/// tolerates ~30% damage, so values past the configured threshold only warn.
pub fn coverage_percent(qr: &QrRaster, emblem_side: u32) -> f32 {
    let covered_modules = emblem_side as f32 / qr.module_size() as f32;
    let data_modules = qr.module_count() as f32 * qr.module_count() as f32;
    covered_modules * covered_modules / data_modules * 100.0
}

// Final assembly
//------------------------------------------------------------------------------

/// Frames the finished symbol in a uniform background border.
pub fn add_outer_border(image: &RgbaImage, border: u32, background: Rgba<u8>) -> RgbaImage {
    let mut canvas =
        RgbaImage::from_pixel(image.width() + border, image.height() + border, background);
    imageops::overlay(&mut canvas, image, border as i64 / 2, border as i64 / 2);
    canvas
}

/// Persists the final raster. The format is taken from the path extension.
/// A missing target directory is a distinct failure from a write error.
pub fn save(image: &RgbaImage, path: &Path) -> EmblemResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Err(EmblemError::ResourceNotFound(parent.to_path_buf()));
        }
    }
    image.save(path).map_err(|e| EmblemError::IOWriteError(path.to_path_buf(), e.to_string()))
}

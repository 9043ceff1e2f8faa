use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::error::{EmblemError, EmblemResult};

// Logo loading
//------------------------------------------------------------------------------

/// Loads the logo asset as RGBA. A missing file and an unreadable file are
/// distinct failures so the caller can report them precisely.
pub fn load(path: &Path) -> EmblemResult<RgbaImage> {
    if !path.exists() {
        return Err(EmblemError::ResourceNotFound(path.to_path_buf()));
    }
    let img = image::open(path)
        .map_err(|e| EmblemError::DecodeError(path.to_path_buf(), e.to_string()))?;
    Ok(img.to_rgba8())
}

// Compositing
//------------------------------------------------------------------------------

/// Scales the logo so its longer side spans `relative_size` of the emblem,
/// boosts contrast for print and pastes it centered using the logo's own
/// alpha as the blend mask.
pub fn composite(
    mut emblem: RgbaImage,
    logo: &RgbaImage,
    relative_size: f32,
    contrast_boost: f32,
) -> RgbaImage {
    let target = (emblem.width() as f32 * relative_size) as u32;
    let (w, h) = fit_within(logo.width(), logo.height(), target);

    let resized = imageops::resize(logo, w, h, FilterType::Lanczos3);
    // A neutral boost must leave the logo bit-identical; the contrast
    // remap is not an exact identity at factor 1.0
    let adjusted = if contrast_boost == 1.0 {
        resized
    } else {
        imageops::contrast(&resized, (contrast_boost - 1.0) * 100.0)
    };

    // Signed offsets: an emblem smaller than the minimum 1px logo still
    // centers instead of underflowing, overlay clips the excess
    let x = (emblem.width() as i64 - w as i64) / 2;
    let y = (emblem.height() as i64 - h as i64) / 2;
    imageops::overlay(&mut emblem, &adjusted, x, y);
    emblem
}

/// Aspect-preserving fit: the longer dimension becomes `target`.
pub fn fit_within(width: u32, height: u32, target: u32) -> (u32, u32) {
    let scale = (target as f32 / width as f32).min(target as f32 / height as f32);
    let w = ((width as f32 * scale) as u32).max(1);
    let h = ((height as f32 * scale) as u32).max(1);
    (w, h)
}

#[cfg(test)]
mod logo_tests {
    use std::io::Write;

    use image::{Rgba, RgbaImage};
    use test_case::test_case;

    use super::{composite, fit_within, load};
    use crate::error::EmblemError;

    #[test_case(200, 100, 140, (140, 70); "landscape")]
    #[test_case(100, 200, 140, (70, 140); "portrait")]
    #[test_case(50, 50, 140, (140, 140); "square upscale")]
    fn test_fit_within(w: u32, h: u32, target: u32, expected: (u32, u32)) {
        assert_eq!(fit_within(w, h, target), expected);
    }

    #[test]
    fn test_composite_centers_opaque_logo() {
        let background = Rgba([255, 255, 255, 255]);
        let red = Rgba([200, 16, 46, 255]);
        let emblem = RgbaImage::from_pixel(200, 200, background);
        let logo = RgbaImage::from_pixel(100, 100, red);

        let out = composite(emblem, &logo, 0.5, 1.0);
        assert_eq!(*out.get_pixel(100, 100), red);
        // Outside the pasted 100x100 block the emblem shows through
        assert_eq!(*out.get_pixel(10, 10), background);
    }

    #[test]
    fn test_neutral_contrast_boost_is_identity() {
        let red = Rgba([200, 16, 46, 255]);
        let emblem = RgbaImage::from_pixel(200, 200, Rgba([255, 255, 255, 255]));
        // Logo already at target size, so the paste is bit-exact
        let logo = RgbaImage::from_pixel(140, 140, red);

        let out = composite(emblem, &logo, 0.7, 1.0);
        assert_eq!(*out.get_pixel(100, 100), red);
        assert_eq!(*out.get_pixel(30, 100), red);
    }

    #[test]
    fn test_emblem_smaller_than_logo_minimum_does_not_panic() {
        let background = Rgba([255, 255, 255, 255]);
        let emblem = RgbaImage::from_pixel(1, 1, background);
        let logo = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));

        // Target size rounds to zero, the logo clamps to 1x1 and must
        // still composite instead of underflowing the offset
        let out = composite(emblem, &logo, 0.7, 1.0);
        assert_eq!(out.dimensions(), (1, 1));
    }

    #[test]
    fn test_transparent_logo_leaves_emblem_visible() {
        let background = Rgba([255, 255, 255, 255]);
        let emblem = RgbaImage::from_pixel(200, 200, background);
        let logo = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 0]));

        let out = composite(emblem, &logo, 0.7, 1.1);
        assert_eq!(*out.get_pixel(100, 100), background);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.png");
        assert_eq!(load(&path), Err(EmblemError::ResourceNotFound(path)));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not an image").unwrap();
        drop(file);

        assert!(matches!(load(&path), Err(EmblemError::DecodeError(_, _))));
    }

    #[test]
    fn test_load_round_trips_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let logo = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        logo.save(&path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.dimensions(), (16, 16));
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
    }
}

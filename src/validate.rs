use image::RgbaImage;

use crate::error::{EmblemError, EmblemResult};

// Scan check
//------------------------------------------------------------------------------

/// Narrow interface over a barcode reader. The pipeline only ever asks for
/// the first decodable payload.
pub trait SymbolDecoder {
    fn decode(&self, image: &RgbaImage) -> Option<String>;
}

/// `SymbolDecoder` backed by `rqrr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl SymbolDecoder for RqrrDecoder {
    fn decode(&self, image: &RgbaImage) -> Option<String> {
        let (w, h) = image.dimensions();
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
                let p = image.get_pixel(x as u32, y as u32);
                ((p[0] as u32 * 299 + p[1] as u32 * 587 + p[2] as u32 * 114) / 1000) as u8
            });
        prepared.detect_grids().iter().find_map(|grid| grid.decode().ok().map(|(_, content)| content))
    }
}

/// Compares the decoded payload against the original data. A mismatch or an
/// undecodable image is reported as `ValidationMismatch`; callers treat it
/// as advisory and never discard the artifact.
pub fn verify(decoder: &dyn SymbolDecoder, image: &RgbaImage, expected: &str) -> EmblemResult<()> {
    match decoder.decode(image) {
        Some(found) if found == expected => Ok(()),
        found => Err(EmblemError::ValidationMismatch { expected: expected.to_string(), found }),
    }
}

use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::config::Palette;
use crate::encode::QrRaster;

// Finder patterns
//------------------------------------------------------------------------------

/// Concentric square sides in modules. The 7:5:3 ratio is what readers look
/// for and must not change.
pub const OUTER_SIDE_MODULES: u32 = 7;
pub const INNER_SIDE_MODULES: u32 = 5;
pub const CENTER_SIDE_MODULES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl Corner {
    pub const ALL: [Corner; 3] = [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft];

    /// Pixel position of the finder pattern's top-left corner.
    pub fn origin(self, qr: &QrRaster) -> (i32, i32) {
        let offset = qr.symbol_origin() as i32;
        let finder_sz = (OUTER_SIDE_MODULES * qr.module_size()) as i32;
        let far = qr.pixel_width() as i32 - offset - finder_sz;
        match self {
            Self::TopLeft => (offset, offset),
            Self::TopRight => (far, offset),
            Self::BottomLeft => (offset, far),
        }
    }
}

/// Overdraws the three finder patterns with the hollow ring-in-box style:
/// accent outer square, background ring, accent center. Outer bounding box
/// and concentric structure stay intact, which is what keeps the symbol
/// locatable.
pub fn paint_finder_patterns(qr: &mut QrRaster, palette: &Palette) {
    let s = qr.module_size();
    for corner in Corner::ALL {
        let (x, y) = corner.origin(qr);
        draw_square(qr, x, y, OUTER_SIDE_MODULES * s, palette.accent);
        draw_square(qr, x + s as i32, y + s as i32, INNER_SIDE_MODULES * s, palette.background);
        draw_square(qr, x + 2 * s as i32, y + 2 * s as i32, CENTER_SIDE_MODULES * s, palette.accent);
    }
}

fn draw_square(qr: &mut QrRaster, x: i32, y: i32, side: u32, color: image::Rgba<u8>) {
    draw_filled_rect_mut(&mut qr.image, Rect::at(x, y).of_size(side, side), color);
}

#[cfg(test)]
mod finder_tests {
    use test_case::test_case;

    use super::{paint_finder_patterns, Corner, OUTER_SIDE_MODULES};
    use crate::config::Palette;
    use crate::encode::{MatrixEncoder, MatrixSpec, QrcodeEncoder};

    fn encoded() -> crate::encode::QrRaster {
        let spec = MatrixSpec::new("https://example.org", 5, 3);
        QrcodeEncoder.encode(&spec, &Palette::default()).unwrap()
    }

    #[test_case(Corner::TopLeft; "top left")]
    #[test_case(Corner::TopRight; "top right")]
    #[test_case(Corner::BottomLeft; "bottom left")]
    fn test_concentric_rings(corner: Corner) {
        let palette = Palette::default();
        let mut qr = encoded();
        paint_finder_patterns(&mut qr, &palette);

        let s = qr.module_size();
        let (x, y) = corner.origin(&qr);
        let (x, y) = (x as u32, y as u32);

        // One sample per ring along the diagonal, plus the last pixel of the
        // outer square to pin the exact 7s side length.
        assert_eq!(*qr.image.get_pixel(x, y), palette.accent);
        assert_eq!(*qr.image.get_pixel(x + s, y + s), palette.background);
        assert_eq!(*qr.image.get_pixel(x + 2 * s, y + 2 * s), palette.accent);
        assert_eq!(*qr.image.get_pixel(x + 3 * s, y + 3 * s), palette.accent);
        assert_eq!(*qr.image.get_pixel(x + 7 * s - 1, y + 7 * s - 1), palette.accent);
    }

    #[test]
    fn test_pixels_outside_finders_untouched() {
        let palette = Palette::default();
        let mut qr = encoded();
        let before = qr.image.clone();
        paint_finder_patterns(&mut qr, &palette);

        let finder_sz = OUTER_SIDE_MODULES * qr.module_size();
        let boxes: Vec<(u32, u32)> =
            Corner::ALL.iter().map(|c| c.origin(&qr)).map(|(x, y)| (x as u32, y as u32)).collect();

        for y in 0..qr.pixel_width() {
            for x in 0..qr.pixel_width() {
                let inside = boxes
                    .iter()
                    .any(|&(bx, by)| x >= bx && x < bx + finder_sz && y >= by && y < by + finder_sz);
                if !inside {
                    assert_eq!(before.get_pixel(x, y), qr.image.get_pixel(x, y), "pixel {x},{y}");
                }
            }
        }
    }
}

use image::RgbaImage;
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use imageproc::point::Point;

use crate::config::{Palette, RenderConfig};

// Emblem geometry
//------------------------------------------------------------------------------

/// Pure geometric description of the soccer-ball emblem. Rendering the same
/// geometry twice yields pixel-identical rasters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmblemGeometry {
    /// Canvas side and ball diameter in pixels
    pub diameter: u32,
    /// Central pentagon radius as a fraction of the ball radius
    pub pentagon_radius_factor: f32,
    /// Hexagon radius as a fraction of the ball radius
    pub hexagon_radius_factor: f32,
    /// Hexagon center distance from the ball center, fraction of the radius
    pub hexagon_distance_factor: f32,
    /// Pentagon rotation in degrees; -90 points a vertex straight up
    pub rotation_offset: f32,
}

impl EmblemGeometry {
    /// Derives the emblem geometry for a symbol of `qr_height` pixels.
    pub fn from_config(config: &RenderConfig, qr_height: u32) -> Self {
        Self {
            // Tiny symbols and ratios can round to zero; keep a drawable canvas
            diameter: ((qr_height as f32 * config.ball_relative_size) as u32).max(1),
            pentagon_radius_factor: config.pentagon_radius_factor,
            hexagon_radius_factor: config.hexagon_radius_factor,
            hexagon_distance_factor: config.hexagon_distance_factor,
            rotation_offset: -90.0,
        }
    }

    /// Seam line width, scaled so the pattern stays visible at print sizes.
    pub fn stroke_width(&self) -> u32 {
        (self.diameter / 200).max(1)
    }
}

// Rendering
//------------------------------------------------------------------------------

/// Draws the emblem on a transparent canvas: filled ball, central pentagon,
/// five surrounding hexagons at 72 degree steps and a thin rim.
pub fn render(geometry: &EmblemGeometry, palette: &Palette) -> RgbaImage {
    let d = geometry.diameter;
    let mut canvas = RgbaImage::new(d, d);

    let center = d as f32 / 2.0;
    let ball_radius = d as f32 / 2.0;
    let stroke = geometry.stroke_width();

    draw_filled_circle_mut(
        &mut canvas,
        (d as i32 / 2, d as i32 / 2),
        d as i32 / 2,
        palette.background,
    );

    let pentagon_radius = ball_radius * geometry.pentagon_radius_factor;
    draw_polygon_outline(
        &mut canvas,
        (center, center),
        pentagon_radius,
        5,
        geometry.rotation_offset,
        stroke,
        palette,
    );

    let hexagon_radius = ball_radius * geometry.hexagon_radius_factor;
    let hexagon_distance = ball_radius * geometry.hexagon_distance_factor;
    for i in 0..5 {
        let angle = (i as f32 * 72.0).to_radians();
        let hx = center + hexagon_distance * angle.cos();
        let hy = center + hexagon_distance * angle.sin();
        draw_polygon_outline(&mut canvas, (hx, hy), hexagon_radius, 6, 0.0, stroke, palette);
    }

    // Rim; imageproc strokes are one pixel, so thickness comes from
    // stepping the radius inward per pass
    for pass in 0..stroke {
        let radius = d as i32 / 2 - 1 - pass as i32;
        if radius > 0 {
            draw_hollow_circle_mut(
                &mut canvas,
                (d as i32 / 2, d as i32 / 2),
                radius,
                palette.pattern,
            );
        }
    }

    canvas
}

fn draw_polygon_outline(
    canvas: &mut RgbaImage,
    center: (f32, f32),
    radius: f32,
    sides: u32,
    rotation_deg: f32,
    stroke: u32,
    palette: &Palette,
) {
    for pass in 0..stroke {
        let radius = radius - pass as f32;
        if radius <= 0.0 {
            break;
        }
        let vertices = polygon_vertices(center, radius, sides, rotation_deg);
        for k in 0..vertices.len() {
            let a = vertices[k];
            let b = vertices[(k + 1) % vertices.len()];
            draw_line_segment_mut(canvas, (a.x, a.y), (b.x, b.y), palette.pattern);
        }
    }
}

fn polygon_vertices(
    (cx, cy): (f32, f32),
    radius: f32,
    sides: u32,
    rotation_deg: f32,
) -> Vec<Point<f32>> {
    (0..sides)
        .map(|i| {
            let angle = (i as f32 * 360.0 / sides as f32 + rotation_deg).to_radians();
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

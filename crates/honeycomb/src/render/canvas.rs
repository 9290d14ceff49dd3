//! Software RGBA canvas backed by an [`RgbaImage`].
//!
//! Fills and outlines go through `imageproc`'s polygon rasterizer; text is drawn with an
//! `ab_glyph` font (DejaVu Sans Mono is bundled) and centred on its anchor.
use std::fmt;
use std::sync::OnceLock;

use ab_glyph::FontArc;
use glam::Vec2;
use image::{Rgba as Pixel, RgbaImage};
use imageproc::drawing::{draw_hollow_polygon_mut, draw_polygon_mut, draw_text_mut, text_size};
use imageproc::point::Point;
use tracing::warn;

use crate::render::{Rgba, Surface};

/// Pixel height of label text unless overridden with [`PixelCanvas::with_font`].
pub const DEFAULT_TEXT_SCALE: f32 = 14.0;

static BUNDLED_FONT_BYTES: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

fn bundled_font() -> Option<FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| match FontArc::try_from_slice(BUNDLED_FONT_BYTES) {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Bundled label font failed to load: {}", err);
            None
        }
    })
    .clone()
}

/// Text drawn onto a [`PixelCanvas`], kept so callers can inspect what was written where.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub at: Vec2,
    pub color: Rgba,
}

/// A transparent-initialized RGBA8 raster.
#[derive(Clone)]
pub struct PixelCanvas {
    image: RgbaImage,
    labels: Vec<TextLabel>,
    font: Option<FontArc>,
    text_scale: f32,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            labels: Vec::new(),
            font: bundled_font(),
            text_scale: DEFAULT_TEXT_SCALE,
        }
    }

    /// Draws labels with `font` at `scale` pixels instead of the bundled font.
    pub fn with_font(mut self, font: FontArc, scale: f32) -> Self {
        self.font = Some(font);
        self.text_scale = scale;
        self
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|px| px.0)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Raw row-major RGBA bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.image.pixels().filter(|px| px.0[3] != 0).count()
    }

    fn is_empty_area(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl fmt::Debug for PixelCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelCanvas")
            .field("size", &self.image.dimensions())
            .field("labels", &self.labels)
            .field("has_font", &self.font.is_some())
            .field("text_scale", &self.text_scale)
            .finish()
    }
}

/// Rounds `points` to pixel coordinates the way the rasterizer wants them: no repeated
/// neighbours and no closing point equal to the first.
fn pixel_polygon(points: &[Vec2]) -> Option<Vec<Point<i32>>> {
    if points.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let mut poly: Vec<Point<i32>> = points
        .iter()
        .map(|p| Point::new(p.x.round() as i32, p.y.round() as i32))
        .collect();
    poly.dedup();
    if poly.len() > 2 && poly.first() == poly.last() {
        poly.pop();
    }
    (poly.len() >= 3).then_some(poly)
}

/// The quad covering the segment `a → b` widened to `width`.
fn thick_segment(a: Vec2, b: Vec2, width: f32) -> Option<[Vec2; 4]> {
    let dir = (b - a).try_normalize()?;
    let n = dir.perp() * (width * 0.5);
    Some([a + n, b + n, b - n, a - n])
}

impl Surface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
        self.labels.clear();
    }

    fn clear(&mut self) {
        self.image.fill(0);
        self.labels.clear();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if self.is_empty_area() {
            return;
        }
        if let Some(poly) = pixel_polygon(points) {
            draw_polygon_mut(&mut self.image, &poly, Pixel(color));
        }
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        if self.is_empty_area() || points.len() < 2 || points.iter().any(|p| !p.is_finite()) {
            return;
        }
        let mut outline: Vec<Point<f32>> = points.iter().map(|p| Point::new(p.x, p.y)).collect();
        outline.dedup();
        if outline.len() > 2 && outline.first() == outline.last() {
            outline.pop();
        }
        if outline.len() < 2 {
            return;
        }
        draw_hollow_polygon_mut(&mut self.image, &outline, Pixel(color));

        if width > 1.0 {
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let Some(quad) = thick_segment(a, b, width) else {
                    continue;
                };
                if let Some(poly) = pixel_polygon(&quad) {
                    draw_polygon_mut(&mut self.image, &poly, Pixel(color));
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba) {
        self.labels.push(TextLabel {
            text: text.to_owned(),
            at,
            color,
        });
        if self.is_empty_area() || text.is_empty() || !at.is_finite() {
            return;
        }
        let Some(font) = self.font.as_ref() else {
            return;
        };
        let (w, h) = text_size(self.text_scale, font, text);
        let x = (at.x - w as f32 * 0.5).round() as i32;
        let y = (at.y - h as f32 * 0.5).round() as i32;
        draw_text_mut(&mut self.image, Pixel(color), x, y, self.text_scale, font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];
    const CLEAR: Rgba = [0, 0, 0, 0];

    fn square(x: f32, y: f32, s: f32) -> [Vec2; 4] {
        [
            Vec2::new(x, y),
            Vec2::new(x + s, y),
            Vec2::new(x + s, y + s),
            Vec2::new(x, y + s),
        ]
    }

    fn painted_in(canvas: &PixelCanvas, x0: u32, y0: u32, x1: u32, y1: u32) -> usize {
        (y0..y1)
            .flat_map(|y| (x0..x1).map(move |x| (x, y)))
            .filter(|&(x, y)| canvas.pixel(x, y).is_some_and(|px| px[3] != 0))
            .count()
    }

    #[test]
    fn starts_transparent() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.size(), (4, 3));
        assert_eq!(canvas.as_raw().len(), 48);
        assert_eq!(canvas.painted_pixels(), 0);
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn fill_covers_the_polygon_and_nothing_outside() {
        let mut canvas = PixelCanvas::new(12, 12);
        canvas.fill_polygon(&square(2.0, 2.0, 4.0), RED);
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(4, 4), Some(RED));
        assert_eq!(canvas.pixel(8, 8), Some(CLEAR));
        assert_eq!(canvas.pixel(0, 0), Some(CLEAR));
        assert_eq!(painted_in(&canvas, 2, 2, 6, 6), 16);
    }

    #[test]
    fn fill_accepts_a_closing_point() {
        let mut canvas = PixelCanvas::new(12, 12);
        let mut closed = square(2.0, 2.0, 4.0).to_vec();
        closed.push(closed[0]);
        canvas.fill_polygon(&closed, RED);
        assert_eq!(canvas.pixel(4, 4), Some(RED));
    }

    #[test]
    fn fill_clips_to_canvas() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_polygon(&square(-10.0, -10.0, 30.0), RED);
        assert_eq!(canvas.painted_pixels(), 16);
    }

    #[test]
    fn stroke_leaves_interior_empty() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.stroke_polygon(&square(2.0, 2.0, 15.0), RED, 1.0);
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(10, 10), Some(CLEAR));
        assert!(canvas.painted_pixels() > 0);
    }

    #[test]
    fn wider_strokes_paint_more() {
        let mut thin = PixelCanvas::new(30, 30);
        let mut thick = PixelCanvas::new(30, 30);
        thin.stroke_polygon(&square(5.0, 5.0, 20.0), RED, 1.0);
        thick.stroke_polygon(&square(5.0, 5.0, 20.0), RED, 4.0);
        assert!(thick.painted_pixels() > thin.painted_pixels());
        assert_eq!(thick.pixel(6, 15), Some(RED));
        assert_eq!(thick.pixel(15, 15), Some(CLEAR));
    }

    #[test]
    fn text_is_rasterized_around_its_anchor() {
        let mut canvas = PixelCanvas::new(60, 40);
        canvas.fill_text("0.5", Vec2::new(30.0, 20.0), RED);
        assert_eq!(canvas.labels().len(), 1);
        assert!(painted_in(&canvas, 18, 10, 42, 30) > 0);
        assert_eq!(painted_in(&canvas, 0, 0, 60, 4), 0);
        assert_eq!(painted_in(&canvas, 0, 0, 8, 40), 0);
        for px in canvas.image().pixels().filter(|px| px.0[3] != 0) {
            assert_eq!(px.0[1], 0);
            assert_eq!(px.0[2], 0);
        }
    }

    #[test]
    fn clear_drops_pixels_and_labels() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.fill_polygon(&square(0.0, 0.0, 8.0), RED);
        canvas.fill_text("0.5", Vec2::new(4.0, 4.0), RED);
        assert_eq!(canvas.labels().len(), 1);
        canvas.clear();
        assert_eq!(canvas.painted_pixels(), 0);
        assert!(canvas.labels().is_empty());
    }

    #[test]
    fn degenerate_polygons_draw_nothing() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.fill_polygon(&[Vec2::ZERO, Vec2::ONE], RED);
        canvas.fill_polygon(&[Vec2::ONE, Vec2::ONE, Vec2::ONE], RED);
        canvas.stroke_polygon(&[Vec2::ZERO], RED, 2.0);
        canvas.fill_polygon(&square(f32::NAN, 0.0, 4.0), RED);
        assert_eq!(canvas.painted_pixels(), 0);
    }

    #[test]
    fn zero_sized_canvas_ignores_drawing() {
        let mut canvas = PixelCanvas::default();
        canvas.fill_polygon(&square(0.0, 0.0, 4.0), RED);
        canvas.stroke_polygon(&square(0.0, 0.0, 4.0), RED, 2.0);
        canvas.fill_text("1", Vec2::ZERO, RED);
        assert_eq!(canvas.painted_pixels(), 0);
    }
}

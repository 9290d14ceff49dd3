//! Drawing surfaces for the honeycomb and its marker overlay.
//!
//! The layer only talks to the [`Surface`] trait. [`PixelCanvas`] rasterizes into an RGBA
//! buffer; [`RecordingSurface`] keeps the issued [`DrawCommand`]s for inspection.
use glam::Vec2;

pub mod canvas;
pub mod color;

pub use canvas::{PixelCanvas, TextLabel};

/// 8-bit RGBA colour.
pub type Rgba = [u8; 4];

/// A 2D drawing target sized in pixels.
pub trait Surface {
    /// Current size as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Resizes the surface, discarding its contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Fills a closed polygon.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);

    /// Strokes the outline of a closed polygon.
    fn stroke_polygon(&mut self, points: &[Vec2], color: Rgba, width: f32);

    /// Draws text centered on `at`.
    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba);
}

/// One operation issued against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPolygon {
        points: Vec<Vec2>,
        color: Rgba,
    },
    StrokePolygon {
        points: Vec<Vec2>,
        color: Rgba,
        width: f32,
    },
    Text {
        text: String,
        at: Vec2,
        color: Rgba,
    },
}

/// A surface that remembers what was drawn since the last clear.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of filled polygons currently on the surface.
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPolygon { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokePolygon {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            color,
        });
    }
}

//! Layer configuration.
use crate::error::{Error, Result};
use crate::render::Rgba;

/// Side length used by the map viewer's honeycomb.
pub const DEFAULT_SIDE_LENGTH: f32 = 20.0;

/// Number of characters kept from a marker's intensity label.
pub const DEFAULT_LABEL_CHARS: usize = 5;

/// Configuration for a [`crate::layer::HoneycombLayer`].
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct HoneycombConfig {
    /// Hexagon side length in pixels.
    pub side_length: f32,
    /// Outline colour of the selected-cell marker.
    pub marker_stroke: Rgba,
    /// Outline width of the selected-cell marker in pixels.
    pub marker_stroke_width: f32,
    /// Colour of the marker's intensity label.
    pub marker_text: Rgba,
    /// Maximum number of characters shown in the marker label.
    pub label_chars: usize,
}

impl Default for HoneycombConfig {
    fn default() -> Self {
        Self {
            side_length: DEFAULT_SIDE_LENGTH,
            marker_stroke: [0x33, 0x33, 0x33, 0xff],
            marker_stroke_width: 2.0,
            marker_text: [0x33, 0x33, 0x33, 0xff],
            label_chars: DEFAULT_LABEL_CHARS,
        }
    }
}

impl HoneycombConfig {
    /// Creates a new [`HoneycombConfig`] with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hexagon side length.
    pub fn with_side_length(mut self, side_length: f32) -> Self {
        self.side_length = side_length;
        self
    }

    /// Sets the marker outline colour.
    pub fn with_marker_stroke(mut self, color: Rgba) -> Self {
        self.marker_stroke = color;
        self
    }

    /// Sets the marker outline width.
    pub fn with_marker_stroke_width(mut self, width: f32) -> Self {
        self.marker_stroke_width = width;
        self
    }

    /// Sets the marker label colour.
    pub fn with_marker_text(mut self, color: Rgba) -> Self {
        self.marker_text = color;
        self
    }

    /// Sets the marker label length.
    pub fn with_label_chars(mut self, label_chars: usize) -> Self {
        self.label_chars = label_chars;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.side_length.is_finite() || self.side_length <= 0.0 {
            return Err(Error::InvalidConfig(
                "side_length must be finite and > 0".into(),
            ));
        }
        if !self.marker_stroke_width.is_finite() || self.marker_stroke_width <= 0.0 {
            return Err(Error::InvalidConfig(
                "marker_stroke_width must be finite and > 0".into(),
            ));
        }
        if self.label_chars == 0 {
            return Err(Error::InvalidConfig("label_chars must be > 0".into()));
        }

        Ok(())
    }
}

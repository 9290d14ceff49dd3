//! The selected-cell marker.
use glam::Vec2;

/// A highlighted hexagon and the intensity shown in its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Pixel center of the selected hexagon.
    pub center: Vec2,
    /// Intensity of the cell at the time it was selected.
    pub intensity: f64,
}

impl Marker {
    pub fn new(center: Vec2, intensity: f64) -> Self {
        Self { center, intensity }
    }

    /// Label text, cut to at most `max_chars` characters.
    pub fn label(&self, max_chars: usize) -> String {
        truncate_label(&self.intensity.to_string(), max_chars)
    }
}

fn truncate_label(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

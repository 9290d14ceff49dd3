//! Diverging red/blue colour scale for cell intensities.
use std::fmt;

use crate::render::Rgba;

/// Hue used for positive intensities.
pub const POSITIVE_HUE: u16 = 0;
/// Hue used for negative intensities.
pub const NEGATIVE_HUE: u16 = 240;

/// A colour in HSL space with integer percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    /// Hue in degrees, `0..360`.
    pub hue: u16,
    /// Saturation in percent.
    pub saturation: u8,
    /// Lightness in percent.
    pub lightness: u8,
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    /// Converts to opaque 8-bit RGBA.
    pub fn to_rgba(self) -> Rgba {
        let s = self.saturation as f32 / 100.0;
        let l = self.lightness as f32 / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue as f32 / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match self.hue / 60 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_u8(r), to_u8(g), to_u8(b), 255]
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Colour for a cell intensity, or `None` when the cell must not be drawn.
///
/// Positive values darken a red scale by `floor(v·50)` percent of lightness, negative
/// values darken a blue scale by `floor(|v|·50)` percent (rounded away from zero).
pub fn intensity_color(intensity: f64) -> Option<Hsl> {
    if intensity == 0.0 || intensity.is_nan() {
        return None;
    }

    let step = (intensity * 50.0).floor();
    let (hue, lightness) = if intensity > 0.0 {
        (POSITIVE_HUE, 100.0 - step)
    } else {
        (NEGATIVE_HUE, 100.0 + step)
    };

    Some(Hsl::new(hue, 100, lightness.clamp(0.0, 100.0) as u8))
}

//! Hexagon geometry for the honeycomb overlay.
//!
//! Hexagons are flat-topped with side length `a` and apothem `h = sin(60°)·a`.
//! Every hexagon center sits on a lattice point `(col·1.5a, row·h)` whose column and
//! row indices share parity. Tiling and hit-testing both derive centers from
//! [`HexMetrics::lattice_point`], which keeps them bit-identical.
use std::f32::consts::FRAC_PI_3;

use glam::Vec2;

pub mod tiling;

/// Derived measurements of a regular flat-topped hexagon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexMetrics {
    /// Side length in pixels.
    pub side: f32,
    /// Distance from the center to the middle of an edge.
    pub apothem: f32,
}

impl HexMetrics {
    pub fn new(side: f32) -> Self {
        debug_assert!(side.is_finite() && side > 0.0, "side must be > 0");
        Self {
            side,
            apothem: FRAC_PI_3.sin() * side,
        }
    }

    /// Horizontal distance between lattice columns (`1.5a`).
    #[inline]
    pub fn column_step(&self) -> f32 {
        1.5 * self.side
    }

    /// Vertical distance between lattice rows (`h`).
    #[inline]
    pub fn row_step(&self) -> f32 {
        self.apothem
    }

    /// Pixel position of the lattice point at `(col, row)`.
    #[inline]
    pub fn lattice_point(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(
            col as f32 * self.column_step(),
            row as f32 * self.row_step(),
        )
    }

    /// Corner points of the hexagon centered at `center`, clockwise from the right corner
    /// in screen space (y grows downwards).
    pub fn vertices(&self, center: Vec2) -> [Vec2; 6] {
        let a = self.side;
        let h = self.apothem;
        [
            center + Vec2::new(a, 0.0),
            center + Vec2::new(0.5 * a, h),
            center + Vec2::new(-0.5 * a, h),
            center + Vec2::new(-a, 0.0),
            center + Vec2::new(-0.5 * a, -h),
            center + Vec2::new(0.5 * a, -h),
        ]
    }

    /// Returns `true` if `point` lies inside (or on the boundary of) the hexagon at `center`.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let d = (point - center).abs();
        let eps = 1e-3 * self.side;
        d.y <= self.apothem + eps
            && self.apothem * d.x + 0.5 * self.side * d.y <= self.apothem * self.side + eps
    }
}

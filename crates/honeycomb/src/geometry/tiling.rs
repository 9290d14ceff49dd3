//! Viewport tiling: one generation of hexagon centers and their geographic coordinates.
use glam::Vec2;
use mint::Vector2;
use tracing::{debug, warn};

use crate::geo::{GeoCoord, HostMap};
use crate::geometry::hit_test::hit_test;
use crate::geometry::HexMetrics;

/// Pixel centers covering a `width × height` canvas with one hexagon of margin.
///
/// Rows start at `y = 0` and advance by `h`; even rows start at `x = 0`, odd rows at
/// `x = -1.5a`, and centers advance by `3a` while `x <= width + 3a`. Rows are emitted up
/// to and including the first row below the canvas, so every center lies in
/// `[-1.5a, width + 3a] × [0, height + h]`.
pub fn tile_centers(metrics: &HexMetrics, width: f32, height: f32) -> Vec<Vec2> {
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        warn!("Cannot tile a {}x{} canvas.", width, height);
        return Vec::new();
    }
    let side_ok = metrics.side.is_finite() && metrics.side > 0.0;
    let step_ok = metrics.row_step().is_finite() && metrics.row_step() > 0.0;
    if !side_ok || !step_ok {
        warn!(
            "Cannot tile with side {} and row step {}.",
            metrics.side,
            metrics.row_step()
        );
        return Vec::new();
    }

    let max_x = width + 3.0 * metrics.side;
    let cols = (max_x / (3.0 * metrics.side)).floor() as usize + 2;
    let rows = (height / metrics.row_step()).floor() as usize + 2;
    let mut centers = Vec::with_capacity(cols * rows);

    let mut row = 0;
    loop {
        let mut col = if row % 2 == 0 { 0 } else { -1 };
        let y = metrics.lattice_point(0, row).y;
        loop {
            let p = metrics.lattice_point(col, row);
            if p.x > max_x {
                break;
            }
            centers.push(p);
            col += 2;
        }
        if y > height {
            break;
        }
        row += 1;
    }

    centers
}

/// One generation of the honeycomb: pixel centers plus their projected coordinates.
#[derive(Debug, Clone)]
pub struct HexGrid {
    metrics: HexMetrics,
    generation: u64,
    cells: Vec<Vec2>,
    geo_coords: Vec<GeoCoord>,
}

impl HexGrid {
    /// Tiles the host's current viewport and projects every center through it.
    pub fn generate(metrics: HexMetrics, host: &dyn HostMap, generation: u64) -> Self {
        let size = host.size();
        let cells = tile_centers(&metrics, size.x, size.y);
        let geo_coords = cells
            .iter()
            .map(|&c| host.container_point_to_geo(Vector2::from(c)))
            .collect::<Vec<_>>();

        debug!(
            "Generated honeycomb #{} with {} cells over {}x{} px.",
            generation,
            cells.len(),
            size.x,
            size.y
        );

        Self {
            metrics,
            generation,
            cells,
            geo_coords,
        }
    }

    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Pixel centers in row-major order.
    pub fn cells(&self) -> &[Vec2] {
        &self.cells
    }

    /// Geographic coordinates, index-aligned with [`Self::cells`].
    pub fn geo_coords(&self) -> &[GeoCoord] {
        &self.geo_coords
    }

    pub fn first_geo(&self) -> Option<GeoCoord> {
        self.geo_coords.first().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the cell whose center is exactly `center`.
    pub fn position_of(&self, center: Vec2) -> Option<usize> {
        self.cells.iter().position(|&c| c == center)
    }

    /// Center of the hexagon containing a pixel.
    pub fn hit_test(&self, point: impl Into<Vec2>) -> Vec2 {
        hit_test(&self.metrics, point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatHost {
        width: f32,
        height: f32,
        origin: GeoCoord,
    }

    impl HostMap for FlatHost {
        fn size(&self) -> Vector2<f32> {
            Vector2 {
                x: self.width,
                y: self.height,
            }
        }

        fn container_point_to_geo(&self, point: Vector2<f32>) -> GeoCoord {
            GeoCoord::new(
                self.origin.lat - point.y as f64 * 0.01,
                self.origin.lon + point.x as f64 * 0.01,
            )
        }
    }

    fn rows_of(centers: &[Vec2]) -> Vec<Vec<Vec2>> {
        let mut rows: Vec<Vec<Vec2>> = Vec::new();
        for &c in centers {
            match rows.last_mut() {
                Some(row) if row[0].y == c.y => row.push(c),
                _ => rows.push(vec![c]),
            }
        }
        rows
    }

    #[test]
    fn centers_stay_inside_margin_bounds() {
        let m = HexMetrics::new(20.0);
        for (w, h) in [(200.0, 150.0), (31.0, 7.0), (640.0, 480.0), (0.0, 0.0)] {
            let centers = tile_centers(&m, w, h);
            assert!(!centers.is_empty());
            for c in centers {
                assert!(c.x >= -1.5 * m.side && c.x <= w + 3.0 * m.side, "{c:?}");
                assert!(c.y >= 0.0 && c.y <= h + m.apothem, "{c:?}");
            }
        }
    }

    #[test]
    fn rows_advance_by_apothem_and_alternate_offsets() {
        let m = HexMetrics::new(20.0);
        let rows = rows_of(&tile_centers(&m, 200.0, 150.0));
        assert!(rows.len() >= 2);
        for pair in rows.windows(2) {
            assert!((pair[1][0].y - pair[0][0].y - m.apothem).abs() < 1e-4);
        }
        for (r, row) in rows.iter().enumerate() {
            let expected_start = if r % 2 == 0 { 0.0 } else { -30.0 };
            assert_eq!(row[0].x, expected_start);
            for pair in row.windows(2) {
                assert_eq!(pair[1].x - pair[0].x, 60.0);
            }
        }
    }

    #[test]
    fn order_is_row_major() {
        let m = HexMetrics::new(20.0);
        let centers = tile_centers(&m, 200.0, 150.0);
        for pair in centers.windows(2) {
            let (p, q) = (pair[0], pair[1]);
            assert!(q.y > p.y || (q.y == p.y && q.x > p.x));
        }
    }

    #[test]
    fn last_row_is_first_row_below_canvas() {
        let m = HexMetrics::new(20.0);
        let centers = tile_centers(&m, 200.0, 150.0);
        let last_y = centers.last().map(|c| c.y).unwrap_or_default();
        assert!(last_y > 150.0);
        assert!(last_y - m.apothem <= 150.0);
    }

    #[test]
    fn rejects_non_finite_canvas() {
        let m = HexMetrics::new(20.0);
        assert!(tile_centers(&m, f32::NAN, 10.0).is_empty());
        assert!(tile_centers(&m, 10.0, -1.0).is_empty());
    }

    #[test]
    fn rejects_degenerate_side_length() {
        for side in [0.0, -5.0, f32::NAN, f32::INFINITY] {
            let m = HexMetrics {
                side,
                apothem: side * 0.866,
            };
            assert!(tile_centers(&m, 200.0, 150.0).is_empty());
        }
        let flat = HexMetrics {
            side: 20.0,
            apothem: 0.0,
        };
        assert!(tile_centers(&flat, 200.0, 150.0).is_empty());
    }

    #[test]
    fn sampled_canvas_points_hit_generated_cells() {
        let m = HexMetrics::new(20.0);
        let (w, h) = (200.0_f32, 150.0_f32);
        let centers = tile_centers(&m, w, h);
        let mut y = 0.0;
        while y <= h {
            let mut x = 0.0;
            while x <= w {
                let hit = hit_test(&m, Vec2::new(x, y));
                assert!(centers.contains(&hit), "({x}, {y}) resolved to {hit:?}");
                x += 1.7;
            }
            y += 1.3;
        }
        for corner in [Vec2::new(w, 0.0), Vec2::new(0.0, h), Vec2::new(w, h)] {
            assert!(centers.contains(&hit_test(&m, corner)));
        }
    }

    #[test]
    fn every_center_hits_itself() {
        let m = HexMetrics::new(20.0);
        for c in tile_centers(&m, 320.0, 240.0) {
            assert_eq!(hit_test(&m, c), c);
        }
        let odd = HexMetrics::new(13.7);
        for c in tile_centers(&odd, 157.0, 93.0) {
            assert_eq!(hit_test(&odd, c), c);
        }
    }

    #[test]
    fn generate_projects_every_center() {
        let host = FlatHost {
            width: 200.0,
            height: 150.0,
            origin: GeoCoord::new(50.0, 10.0),
        };
        let grid = HexGrid::generate(HexMetrics::new(20.0), &host, 7);
        assert_eq!(grid.generation(), 7);
        assert_eq!(grid.cells().len(), grid.geo_coords().len());
        assert_eq!(grid.first_geo(), Some(GeoCoord::new(50.0, 10.0)));
        for (c, g) in grid.cells().iter().zip(grid.geo_coords()) {
            assert_eq!(*g, host.container_point_to_geo(Vector2::from(*c)));
        }
    }

    #[test]
    fn position_of_finds_exact_centers_only() {
        let host = FlatHost {
            width: 100.0,
            height: 60.0,
            origin: GeoCoord::default(),
        };
        let grid = HexGrid::generate(HexMetrics::new(20.0), &host, 0);
        let third = grid.cells()[2];
        assert_eq!(grid.position_of(third), Some(2));
        assert_eq!(grid.position_of(third + Vec2::new(0.5, 0.0)), None);
    }
}

//! Spherical Web Mercator viewport, the projection used by slippy-map tile servers.
use std::f64::consts::PI;

use mint::Vector2;

use crate::geo::{GeoCoord, HostMap};

/// Edge length of a map tile in pixels at zoom 0.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A rectangular map view described by its center, zoom, and pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMercatorViewport {
    /// Geographic coordinate at the middle of the container.
    pub center: GeoCoord,
    /// Fractional zoom level; the world is `256 · 2^zoom` pixels wide.
    pub zoom: f64,
    /// Container width in pixels.
    pub width: f32,
    /// Container height in pixels.
    pub height: f32,
}

impl WebMercatorViewport {
    pub fn new(center: GeoCoord, zoom: f64, width: f32, height: f32) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Projects a coordinate to absolute world pixels at the current zoom.
    pub fn project(&self, coord: GeoCoord) -> (f64, f64) {
        let size = self.world_size();
        let lat = coord.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = size * (coord.lon + 180.0) / 360.0;
        let y = size * (0.5 - (PI / 4.0 + lat / 2.0).tan().ln() / (2.0 * PI));
        (x, y)
    }

    /// Inverse of [`Self::project`].
    pub fn unproject(&self, x: f64, y: f64) -> GeoCoord {
        let size = self.world_size();
        let lon = x / size * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / size;
        let lat = n.sinh().atan().to_degrees();
        GeoCoord::new(lat, lon)
    }

    /// World pixel of the container's top-left corner.
    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = self.project(self.center);
        (cx - self.width as f64 / 2.0, cy - self.height as f64 / 2.0)
    }

    /// Container pixel of a geographic coordinate.
    pub fn geo_to_container_point(&self, coord: GeoCoord) -> Vector2<f32> {
        let (x, y) = self.project(coord);
        let (ox, oy) = self.origin();
        Vector2 {
            x: (x - ox) as f32,
            y: (y - oy) as f32,
        }
    }

    /// Moves the view by a pixel offset, as a drag would.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        let (cx, cy) = self.project(self.center);
        self.center = self.unproject(cx + dx as f64, cy + dy as f64);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

impl HostMap for WebMercatorViewport {
    fn size(&self) -> Vector2<f32> {
        Vector2 {
            x: self.width,
            y: self.height,
        }
    }

    fn container_point_to_geo(&self, point: Vector2<f32>) -> GeoCoord {
        let (ox, oy) = self.origin();
        self.unproject(ox + point.x as f64, oy + point.y as f64)
    }
}

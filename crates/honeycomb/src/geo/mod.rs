//! Geographic coordinates and the host map boundary.
//!
//! The honeycomb never projects coordinates itself; it asks a [`HostMap`] to turn
//! container pixels into latitude/longitude.
use mint::Vector2;

pub mod mercator;

pub use mercator::WebMercatorViewport;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `[latitude, longitude]`, the order used on the wire.
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl From<[f64; 2]> for GeoCoord {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<GeoCoord> for [f64; 2] {
    fn from(value: GeoCoord) -> Self {
        value.to_array()
    }
}

/// The map surface the honeycomb is attached to.
pub trait HostMap {
    /// Current container size in pixels.
    fn size(&self) -> Vector2<f32>;

    /// Geographic coordinate under a container pixel.
    fn container_point_to_geo(&self, point: Vector2<f32>) -> GeoCoord;
}

impl<T: HostMap + ?Sized> HostMap for &T {
    fn size(&self) -> Vector2<f32> {
        (**self).size()
    }

    fn container_point_to_geo(&self, point: Vector2<f32>) -> GeoCoord {
        (**self).container_point_to_geo(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_conversion_keeps_lat_lon_order() {
        let coord = GeoCoord::from([42.0, 44.5]);
        assert_eq!(coord.lat, 42.0);
        assert_eq!(coord.lon, 44.5);
        let back: [f64; 2] = coord.into();
        assert_eq!(back, [42.0, 44.5]);
    }
}

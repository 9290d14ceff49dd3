//! The honeycomb overlay layer.
//!
//! [`HoneycombLayer`] keeps a hexagonal tiling in sync with a [`HostMap`] viewport. Every
//! viewport change produces a new generation and a [`RecomputeRequest`]; cell data that
//! comes back is drawn only if it still matches the active generation.
use glam::Vec2;
use tracing::{debug, info};

use crate::config::HoneycombConfig;
use crate::error::Result;
use crate::events::{EventSink, HoneycombEvent, RecomputeRequest};
use crate::geo::{GeoCoord, HostMap};
use crate::geometry::hit_test::hit_test;
use crate::geometry::tiling::HexGrid;
use crate::geometry::HexMetrics;
use crate::render::color::intensity_color;
use crate::render::{PixelCanvas, Surface};

pub mod marker;

use marker::Marker;

/// Intensity of one cell as returned by the data source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSample {
    /// Coordinate the intensity was computed for.
    pub geo: GeoCoord,
    /// Signed intensity; zero means no data.
    pub intensity: f64,
}

impl CellSample {
    pub fn new(geo: GeoCoord, intensity: f64) -> Self {
        Self { geo, intensity }
    }
}

impl From<[f64; 3]> for CellSample {
    fn from([lat, lon, intensity]: [f64; 3]) -> Self {
        Self {
            geo: GeoCoord::new(lat, lon),
            intensity,
        }
    }
}

/// Result of offering cell data to the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawOutcome {
    /// The data matched the active generation and was drawn.
    Drawn { filled: usize },
    /// The data belonged to an older generation and was dropped.
    Stale,
}

/// Hooks a map host calls on an overlay.
pub trait OverlayLayer {
    fn on_attach(&mut self, host: &dyn HostMap);

    fn on_detach(&mut self);

    /// Called after the host moved, zoomed, or resized.
    fn handle_viewport_changed(&mut self, host: &dyn HostMap);
}

/// Remembers which generation a caller is waiting for.
///
/// Useful when the fetching side, not the layer, decides whether a response is still
/// wanted. Only the latest expected request is kept.
#[derive(Debug, Clone, Default)]
pub struct RecomputeTracker {
    awaited: Option<(u64, Option<GeoCoord>, usize)>,
}

impl RecomputeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `request` as the one whose response should be drawn.
    pub fn expect(&mut self, request: &RecomputeRequest) {
        self.awaited = Some((request.generation, request.first(), request.coords.len()));
    }

    pub fn awaited_generation(&self) -> Option<u64> {
        self.awaited.map(|(generation, ..)| generation)
    }

    /// Returns `true` if `data` answers the awaited request.
    pub fn accepts(&self, data: &[CellSample]) -> bool {
        match self.awaited {
            Some((_, first, len)) => len == data.len() && first == data.first().map(|s| s.geo),
            None => false,
        }
    }
}

/// Hexagonal intensity overlay drawn onto a main surface plus a marker surface.
pub struct HoneycombLayer<S: Surface = PixelCanvas, E: EventSink = ()> {
    config: HoneycombConfig,
    metrics: HexMetrics,
    surface: S,
    marker_surface: S,
    sink: E,
    grid: Option<HexGrid>,
    drawn: Option<Vec<CellSample>>,
    marker: Option<Marker>,
    next_generation: u64,
    attached: bool,
}

impl<S: Surface, E: EventSink> HoneycombLayer<S, E> {
    pub fn try_new(config: HoneycombConfig, surface: S, marker_surface: S, sink: E) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, surface, marker_surface, sink))
    }

    pub fn new(config: HoneycombConfig, surface: S, marker_surface: S, sink: E) -> Self {
        debug_assert!(
            config.side_length.is_finite() && config.side_length > 0.0,
            "side_length must be > 0"
        );

        let metrics = HexMetrics::new(config.side_length);
        Self {
            config,
            metrics,
            surface,
            marker_surface,
            sink,
            grid: None,
            drawn: None,
            marker: None,
            next_generation: 0,
            attached: false,
        }
    }

    pub fn config(&self) -> &HoneycombConfig {
        &self.config
    }

    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The active tiling, if attached.
    pub fn grid(&self) -> Option<&HexGrid> {
        self.grid.as_ref()
    }

    /// Generation number of the active tiling.
    pub fn generation(&self) -> Option<u64> {
        self.grid.as_ref().map(HexGrid::generation)
    }

    /// Cell data drawn onto the active tiling.
    pub fn cell_samples(&self) -> Option<&[CellSample]> {
        self.drawn.as_deref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn marker_surface(&self) -> &S {
        &self.marker_surface
    }

    pub fn marker(&self) -> Option<Marker> {
        self.marker
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut E {
        &mut self.sink
    }

    /// Replaces the active tiling with a fresh generation over the host viewport.
    fn regenerate(&mut self, host: &dyn HostMap) {
        self.surface.clear();
        self.drawn = None;

        let generation = self.next_generation;
        self.next_generation += 1;
        let grid = HexGrid::generate(self.metrics, host, generation);
        let request = RecomputeRequest::new(generation, grid.geo_coords().to_vec());
        self.grid = Some(grid);

        self.sink.send(HoneycombEvent::RecomputeRequested(request));
    }

    fn fit_surfaces(&mut self, host: &dyn HostMap) -> (u32, u32) {
        let size = host.size();
        let size_px = (
            size.x.max(0.0).ceil() as u32,
            size.y.max(0.0).ceil() as u32,
        );
        if self.surface.size() != size_px {
            self.surface.resize(size_px.0, size_px.1);
        }
        if self.marker_surface.size() != size_px {
            self.marker_surface.resize(size_px.0, size_px.1);
            if let Some(marker) = self.marker {
                self.draw_marker(marker);
            }
        }
        size_px
    }

    /// Returns `true` if `data` was computed for the active generation.
    ///
    /// Generations are told apart by their first cell coordinate. A resize that keeps the
    /// top-left corner in place keeps that coordinate too, so the cell count must match as
    /// well.
    pub fn is_current(&self, data: &[CellSample]) -> bool {
        match &self.grid {
            Some(grid) => {
                grid.len() == data.len() && grid.first_geo() == data.first().map(|s| s.geo)
            }
            None => false,
        }
    }

    /// Draws `data` if it belongs to the active generation, otherwise drops it.
    pub fn apply_cell_data(&mut self, data: &[CellSample]) -> RedrawOutcome {
        if !self.is_current(data) {
            let active_generation = self.generation().unwrap_or_default();
            let received_first = data.first().map(|s| s.geo);
            debug!(
                "Dropping stale honeycomb data (active generation #{}, first cell {:?}).",
                active_generation, received_first
            );
            self.sink.send(HoneycombEvent::StaleDataDropped {
                active_generation,
                received_first,
            });
            return RedrawOutcome::Stale;
        }

        RedrawOutcome::Drawn {
            filled: self.redraw(data),
        }
    }

    /// Colours every cell of the active tiling from `data` and returns the number filled.
    ///
    /// # Panics
    ///
    /// Panics if `data` is not index-aligned with the active tiling (different length).
    /// Responses that may belong to an older tiling go through [`Self::apply_cell_data`].
    pub fn redraw(&mut self, data: &[CellSample]) -> usize {
        let cells_len = self.grid.as_ref().map_or(0, HexGrid::len);
        assert_eq!(
            data.len(),
            cells_len,
            "cell data must be index-aligned with the active tiling"
        );

        self.surface.clear();
        let mut filled = 0;
        if let Some(grid) = &self.grid {
            for (&center, sample) in grid.cells().iter().zip(data) {
                let Some(color) = intensity_color(sample.intensity) else {
                    continue;
                };
                self.surface
                    .fill_polygon(&self.metrics.vertices(center), color.to_rgba());
                filled += 1;
            }
        }
        self.drawn = Some(data.to_vec());

        let generation = self.generation().unwrap_or_default();
        debug!(
            "Redrew honeycomb #{}: {} of {} cells filled.",
            generation,
            filled,
            data.len()
        );
        self.sink.send(HoneycombEvent::Redrawn { generation, filled });
        filled
    }

    /// Center of the hexagon containing a pixel.
    pub fn hit_test(&self, point: impl Into<Vec2>) -> Vec2 {
        hit_test(&self.metrics, point)
    }

    /// Intensity drawn at the hexagon centered exactly at `center`, or `0.0`.
    pub fn intensity_at(&self, center: Vec2) -> f64 {
        let (Some(grid), Some(drawn)) = (&self.grid, &self.drawn) else {
            return 0.0;
        };
        grid.position_of(center)
            .and_then(|i| drawn.get(i))
            .map_or(0.0, |s| s.intensity)
    }

    fn draw_marker(&mut self, marker: Marker) {
        self.marker_surface.clear();
        self.marker_surface.stroke_polygon(
            &self.metrics.vertices(marker.center),
            self.config.marker_stroke,
            self.config.marker_stroke_width,
        );
        self.marker_surface.fill_text(
            &marker.label(self.config.label_chars),
            marker.center,
            self.config.marker_text,
        );
    }

    /// Outlines a hexagon on the marker surface, replacing any previous marker.
    pub fn show_marker(&mut self, center: Vec2, intensity: f64) -> Marker {
        let marker = Marker::new(center, intensity);
        self.draw_marker(marker);
        self.marker = Some(marker);
        self.sink.send(HoneycombEvent::MarkerShown(marker));
        marker
    }

    pub fn clear_marker(&mut self) {
        self.marker_surface.clear();
        if self.marker.take().is_some() {
            self.sink.send(HoneycombEvent::MarkerCleared);
        }
    }

    /// Selects the hexagon under a clicked pixel. Ignored while detached.
    pub fn handle_click(&mut self, point: impl Into<Vec2>) -> Option<Marker> {
        if !self.attached {
            return None;
        }
        let center = self.hit_test(point);
        let intensity = self.intensity_at(center);
        Some(self.show_marker(center, intensity))
    }
}

impl<S: Surface, E: EventSink> OverlayLayer for HoneycombLayer<S, E> {
    fn on_attach(&mut self, host: &dyn HostMap) {
        let size_px = self.fit_surfaces(host);
        self.attached = true;
        info!("Honeycomb attached to {}x{} px surface.", size_px.0, size_px.1);
        self.sink.send(HoneycombEvent::Attached { size_px });
        self.regenerate(host);
    }

    fn on_detach(&mut self) {
        self.surface.clear();
        self.marker_surface.clear();
        self.grid = None;
        self.drawn = None;
        self.marker = None;
        self.attached = false;
        info!("Honeycomb detached.");
        self.sink.send(HoneycombEvent::Detached);
    }

    fn handle_viewport_changed(&mut self, host: &dyn HostMap) {
        if !self.attached {
            return;
        }
        self.fit_surfaces(host);
        self.regenerate(host);
    }
}

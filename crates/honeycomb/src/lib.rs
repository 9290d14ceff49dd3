#![forbid(unsafe_code)]
//! honeycomb: hexagonal density overlay for map viewports.
//!
//! Modules:
//! - geometry: hexagon metrics, viewport tiling, and constant-time hit-testing
//! - geo: geographic coordinates, the host map boundary, and a Web Mercator viewport
//! - render: drawing surfaces and the diverging intensity colour scale
//! - layer: the overlay layer tying tiling, redraw, staleness, and markers together
//! - events: notifications emitted by the layer and sinks to observe them
//! - request: JSON wire types for recompute requests and responses
//!
//! For a runnable walkthrough, see the `honeycomb_examples` crate.
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod geometry;
pub mod layer;
#[cfg(feature = "serde")]
pub mod request;
pub mod render;

/// Convenient re-exports for common types. Import with `use honeycomb::prelude::*;`.
pub mod prelude {
    pub use crate::config::HoneycombConfig;
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        ChannelSink, EventSink, FnSink, HoneycombEvent, MultiSink, RecomputeRequest, VecSink,
    };
    pub use crate::geo::{GeoCoord, HostMap, WebMercatorViewport};
    pub use crate::geometry::hit_test::{hit_test, hit_test_candidates};
    pub use crate::geometry::tiling::HexGrid;
    pub use crate::geometry::HexMetrics;
    pub use crate::layer::marker::Marker;
    pub use crate::layer::{
        CellSample, HoneycombLayer, OverlayLayer, RecomputeTracker, RedrawOutcome,
    };
    pub use crate::render::color::{intensity_color, Hsl};
    pub use crate::render::{DrawCommand, PixelCanvas, RecordingSurface, Rgba, Surface};
    #[cfg(feature = "serde")]
    pub use crate::request::{ErrorResponse, HoneycombRequest, HoneycombResponse, Method};
}

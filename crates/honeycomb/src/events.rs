//! Notifications emitted by the honeycomb layer and sinks to observe them.
//!
//! The layer reports through an [`EventSink`]: a no-op `()`, a closure ([`FnSink`]),
//! a collecting [`VecSink`], a fan-out [`MultiSink`], or a [`ChannelSink`] that hands
//! events to another thread.
use crossbeam_channel::Sender;

use crate::geo::GeoCoord;
use crate::layer::marker::Marker;

/// Coordinates of a freshly generated tiling that need intensities from the data source.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeRequest {
    /// Generation the coordinates belong to.
    pub generation: u64,
    /// Cell coordinates in the tiling's row-major order.
    pub coords: Vec<GeoCoord>,
}

impl RecomputeRequest {
    pub fn new(generation: u64, coords: Vec<GeoCoord>) -> Self {
        Self { generation, coords }
    }

    /// Coordinate of the first cell, which identifies the generation on the wire.
    pub fn first(&self) -> Option<GeoCoord> {
        self.coords.first().copied()
    }

    /// `[latitude, longitude]` pairs as sent to the data source.
    pub fn wire_cells(&self) -> Vec<[f64; 2]> {
        self.coords.iter().map(|c| c.to_array()).collect()
    }
}

/// Describes events emitted by the honeycomb layer.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum HoneycombEvent {
    /// Emitted when the layer is attached to a host.
    Attached {
        /// Surface size (width, height) in pixels.
        size_px: (u32, u32),
    },

    /// Emitted after every tiling generation.
    RecomputeRequested(RecomputeRequest),

    /// Emitted after cell data was drawn.
    Redrawn {
        /// Generation the data was drawn onto.
        generation: u64,
        /// Number of hexagons that received a colour.
        filled: usize,
    },

    /// Emitted when cell data computed for an older tiling was discarded.
    StaleDataDropped {
        /// Generation that was active when the data arrived.
        active_generation: u64,
        /// First coordinate carried by the discarded data.
        received_first: Option<GeoCoord>,
    },

    /// Emitted when a cell was selected.
    MarkerShown(Marker),

    /// Emitted when the selected-cell marker was removed.
    MarkerCleared,

    /// Emitted when the layer is detached from its host.
    Detached,
}

/// A generic event sink that accepts [`HoneycombEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: HoneycombEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = HoneycombEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: HoneycombEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    #[inline]
    fn send(&mut self, event: HoneycombEvent) {
        (**self).send(event);
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(HoneycombEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(HoneycombEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(HoneycombEvent),
{
    #[inline]
    fn send(&mut self, event: HoneycombEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<HoneycombEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<HoneycombEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[HoneycombEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The most recent recompute request, if any.
    pub fn last_recompute(&self) -> Option<&RecomputeRequest> {
        self.events.iter().rev().find_map(|e| match e {
            HoneycombEvent::RecomputeRequested(req) => Some(req),
            _ => None,
        })
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: HoneycombEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: HoneycombEvent) {
        let Some((last, rest)) = self.sinks.split_last_mut() else {
            return;
        };
        for sink in rest {
            sink.send(event.clone());
        }
        last.send(event);
    }
}

/// Event sink that forwards events over a channel, e.g. to a fetch worker.
///
/// Send failures are ignored; a hung-up receiver simply stops observing.
pub struct ChannelSink {
    pub tx: Sender<HoneycombEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<HoneycombEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    #[inline]
    fn send(&mut self, event: HoneycombEvent) {
        let _ = self.tx.send(event);
    }
}

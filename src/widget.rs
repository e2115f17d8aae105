//! Capability-set interface for the external map-rendering widget
//!
//! The widget is an injected dependency with an explicit lifecycle, never
//! ambient global state. All controller calls into the widget go through
//! [`MapWidget`]; widget-originated events come back through
//! [`WidgetEvent`] values handed to the controller.

use crate::{
    core::geo::{LatLng, LatLngBounds},
    Result,
};

/// Handle to a listener registered on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Opaque handle to an on-map marker, owned exclusively by the marker
/// lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Map-level event streams a listener can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    /// Viewport movement has quiesced
    Idle,
    /// Click on the map background
    Click,
}

/// Visual description of a marker to create.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    /// Displayed label (a cluster's member count, or a name prefix for a
    /// single listing)
    pub label: String,
}

/// Events delivered from the widget into the controller.
///
/// Marker events reference the opaque handle returned by `create_marker`;
/// the controller resolves handles back to the cluster snapshot current at
/// marker-creation time.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The widget finished initializing and can answer `bounds()`
    Ready,
    Idle,
    MapClick { position: LatLng },
    MarkerClick { marker: MarkerId },
    MarkerEnter { marker: MarkerId },
    MarkerLeave { marker: MarkerId },
}

/// Whether the controller consumed an event.
///
/// A consumed marker click must not be forwarded to the map-click path by
/// the host, or the selection it just pinned would immediately be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Consumed,
    Ignored,
}

/// The capability set the external map widget must expose.
pub trait MapWidget {
    /// Current visible bounds. Fails with [`crate::MapError::NotReady`]
    /// until the widget has finished initializing. No side effects.
    fn bounds(&self) -> Result<LatLngBounds>;

    fn add_listener(&mut self, event: MapEventKind) -> Result<ListenerId>;

    fn remove_listener(&mut self, listener: ListenerId) -> Result<()>;

    fn set_center(&mut self, center: LatLng);

    fn set_zoom(&mut self, zoom: f64);

    fn create_marker(&mut self, spec: &MarkerSpec) -> Result<MarkerId>;

    fn destroy_marker(&mut self, marker: MarkerId) -> Result<()>;
}

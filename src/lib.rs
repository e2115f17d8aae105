//! # Marklet
//!
//! A viewport-driven clustering and marker-lifecycle controller for
//! interactive listing maps.
//!
//! The controller watches map viewport changes, fetches the server-side
//! cluster aggregation for the visible region plus the active filters,
//! mirrors the result as on-map markers, and tracks the hover/select
//! interaction state. Repeated viewport changes and remounts never leak
//! markers or event listeners.

pub mod controller;
pub mod core;
pub mod data;
pub mod prelude;
pub mod runtime;
pub mod widget;

// Re-export public API
pub use crate::core::{
    config::ControllerOptions,
    filter::{AreaBucket, FilterCriteria, TransactionKind},
    geo::{LatLng, LatLngBounds},
};

pub use crate::data::{
    listing::{Cluster, Listing},
    source::{ClusterSource, HttpClusterSource},
};

pub use crate::controller::{
    focus::Focus, scheduler::FetchScheduler, store::ApplyOutcome, ClusterMapController,
};

pub use crate::widget::{
    EventOutcome, ListenerId, MapEventKind, MapWidget, MarkerId, MarkerSpec, WidgetEvent,
};

/// Installs an `env_logger` backend for the library's `log` output.
///
/// Host applications normally bring their own logger; this is for demos and
/// test harnesses. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_debug_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_module("marklet", log::LevelFilter::Debug)
        .try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The map widget has not finished initializing; callers retry on the
    /// next organic trigger.
    #[error("map widget not ready")]
    NotReady,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed cluster response: {0}")]
    MalformedResponse(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("marker error: {0}")]
    Marker(String),

    #[error("listener error: {0}")]
    Listener(String),
}

impl MapError {
    /// Fetch-path failures degrade to an empty cluster set rather than
    /// propagating out of the controller.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            MapError::Network(_) | MapError::MalformedResponse(_) | MapError::Serialization(_)
        )
    }
}

/// Error type alias for convenience
pub type Error = MapError;

//! Prelude module for common marklet types and traits
//!
//! Re-exports the most commonly used types, traits, and functions for easy
//! importing with `use marklet::prelude::*;`

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
    focus::Focus,
    markers::MarkerSet,
    scheduler::FetchScheduler,
    store::{ApplyOutcome, ClusterStore, FetchTicket},
    subscriptions::SubscriptionRegistry,
    ClusterMapController,
};

pub use crate::widget::{
    EventOutcome, ListenerId, MapEventKind, MapWidget, MarkerId, MarkerSpec, WidgetEvent,
};

pub use crate::runtime::{runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as MapError, Result};

pub use std::{
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;

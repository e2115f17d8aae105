//! Marker lifecycle management
//!
//! Mirrors the cluster store's current snapshot as on-map markers. Because
//! clusters carry no identity across fetches, reconciliation is
//! destroy-all/recreate-all: incremental diffing would be unsound when a
//! cluster's centroid and membership can change every fetch even with an
//! unchanged count. The index↔handle mapping is fully replaced, never
//! patched.

use crate::{
    data::listing::Cluster,
    prelude::HashMap,
    widget::{MapWidget, MarkerId, MarkerSpec},
};

#[derive(Debug, Default)]
pub struct MarkerSet {
    /// Marker handle per cluster array index of the current snapshot
    handles: Vec<MarkerId>,
    /// Reverse lookup for widget marker events
    cluster_of: HashMap<MarkerId, usize>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every live marker with one marker per cluster in the new
    /// snapshot, positioned at its centroid and labeled with its count.
    ///
    /// A creation failure for one cluster skips that cluster and continues
    /// the batch; it never aborts reconciliation.
    pub fn reconcile(&mut self, widget: &mut dyn MapWidget, clusters: &[Cluster]) {
        self.clear(widget);

        self.handles.reserve(clusters.len());
        for (index, cluster) in clusters.iter().enumerate() {
            let spec = MarkerSpec {
                position: cluster.centroid,
                label: cluster.label(),
            };
            match widget.create_marker(&spec) {
                Ok(id) => {
                    self.handles.push(id);
                    self.cluster_of.insert(id, index);
                }
                Err(e) => {
                    log::warn!(
                        "skipping marker for cluster at ({}, {}): {}",
                        cluster.centroid.lat,
                        cluster.centroid.lng,
                        e
                    );
                }
            }
        }
    }

    /// Destroys every live marker and releases its handle.
    pub fn clear(&mut self, widget: &mut dyn MapWidget) {
        for id in self.handles.drain(..) {
            if let Err(e) = widget.destroy_marker(id) {
                log::warn!("failed to destroy marker {:?}: {}", id, e);
            }
        }
        self.cluster_of.clear();
    }

    /// Cluster array index for a widget marker event, captured at marker
    /// creation time.
    pub fn cluster_index(&self, marker: MarkerId) -> Option<usize> {
        self.cluster_of.get(&marker).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

//! Wire types for listings and server-computed clusters
//!
//! Clusters are ephemeral: every fetch produces an entirely new list with no
//! identity preserved across fetches. Anything holding onto a cluster (focus
//! state, marker handlers) must be invalidated when a new list arrives.

use crate::{core::geo::LatLng, MapError, Result};
use serde::{Deserialize, Serialize};

/// A single geolocated listing, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Listing {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// A server-computed aggregation of nearby listings.
///
/// The grid cell is informational, not an identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(rename = "latGrid")]
    pub lat_grid: i32,
    #[serde(rename = "lngGrid")]
    pub lng_grid: i32,
    pub centroid: LatLng,
    pub count: usize,
    pub members: Vec<Listing>,
}

impl Cluster {
    /// A cluster with `count == 1` still carries one member.
    pub fn is_single(&self) -> bool {
        self.count == 1
    }

    /// Marker label: the member count, or for a single listing the first two
    /// characters of its name.
    pub fn label(&self) -> String {
        if self.is_single() {
            if let Some(listing) = self.members.first() {
                return listing.name.chars().take(2).collect();
            }
        }
        self.count.to_string()
    }

    fn is_well_formed(&self) -> bool {
        self.count >= 1 && !self.members.is_empty() && self.centroid.is_valid()
    }
}

/// Parses a fetched response body into a cluster list.
///
/// A structurally invalid payload (not an array of cluster-shaped records) is
/// reported as `MalformedResponse`; callers treat it exactly like a network
/// failure.
pub fn parse_clusters(payload: serde_json::Value) -> Result<Vec<Cluster>> {
    if !payload.is_array() {
        return Err(MapError::MalformedResponse(format!(
            "expected a JSON array of clusters, got {}",
            json_kind(&payload)
        )));
    }

    let clusters: Vec<Cluster> = serde_json::from_value(payload)
        .map_err(|e| MapError::MalformedResponse(format!("cluster record: {}", e)))?;

    for cluster in &clusters {
        if !cluster.is_well_formed() {
            return Err(MapError::MalformedResponse(format!(
                "cluster at grid ({}, {}) has count {} with {} members",
                cluster.lat_grid,
                cluster.lng_grid,
                cluster.count,
                cluster.members.len()
            )));
        }
    }

    Ok(clusters)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

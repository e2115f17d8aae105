//! Cluster fetch contract and the HTTP-backed implementation
//!
//! One GET per fetch, parameterized by the visible bounds and the active
//! filter. The response body is a JSON array of cluster records; anything
//! else is a malformed response and degrades to an empty cluster set at the
//! store level.

use crate::{
    core::{filter::FilterCriteria, geo::LatLngBounds},
    data::listing::{parse_clusters, Cluster},
    Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;

/// Shared async HTTP client for cluster fetching
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent("marklet/0.1.0")
        .timeout(std::time::Duration::from_secs(30))
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .pool_max_idle_per_host(4)
        .build()
        .expect("failed to build reqwest async client")
});

/// Backend capability for requesting the cluster aggregation of a region.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    async fn fetch_clusters(
        &self,
        bounds: &LatLngBounds,
        filter: &FilterCriteria,
    ) -> Result<Vec<Cluster>>;
}

/// `ClusterSource` backed by an HTTP GET endpoint.
pub struct HttpClusterSource {
    endpoint: String,
    timeout: std::time::Duration,
}

impl HttpClusterSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: std::time::Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn query(
        bounds: &LatLngBounds,
        filter: &FilterCriteria,
    ) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("minLat", bounds.south_west.lat.to_string()),
            ("maxLat", bounds.north_east.lat.to_string()),
            ("minLng", bounds.south_west.lng.to_string()),
            ("maxLng", bounds.north_east.lng.to_string()),
        ];
        pairs.extend(filter.query_pairs());
        pairs
    }
}

#[async_trait]
impl ClusterSource for HttpClusterSource {
    async fn fetch_clusters(
        &self,
        bounds: &LatLngBounds,
        filter: &FilterCriteria,
    ) -> Result<Vec<Cluster>> {
        let response = HTTP_CLIENT
            .get(&self.endpoint)
            .query(&Self::query(bounds, filter))
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let payload: serde_json::Value = response.json().await?;
        parse_clusters(payload)
    }
}

pub mod listing;
pub mod source;

// Re-export the essential types
pub use listing::{parse_clusters, Cluster, Listing};
pub use source::{ClusterSource, HttpClusterSource};

pub mod config;
pub mod filter;
pub mod geo;

// Re-export the essential types
pub use config::ControllerOptions;
pub use filter::{AreaBucket, FilterCriteria, TransactionKind};
pub use geo::{LatLng, LatLngBounds};

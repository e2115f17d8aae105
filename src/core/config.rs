//! Configuration for controller timing and viewport behavior

use crate::core::geo::LatLng;
use std::time::Duration;

/// Options governing the controller's debounce window, initial viewport and
/// the close-up jump performed when a listing is clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    /// Quiescence window for coalescing viewport/filter change bursts
    pub debounce_delay: Duration,
    /// Zoom level applied when recentering onto a clicked listing
    pub close_up_zoom: f64,
    /// Initial map center
    pub initial_center: LatLng,
    /// Initial zoom level
    pub initial_zoom: f64,
    /// Lower zoom bound advertised to the widget
    pub min_zoom: f64,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(500),
            close_up_zoom: 16.0,
            // Seoul city hall
            initial_center: LatLng::new(37.5666805, 126.9784147),
            initial_zoom: 10.0,
            min_zoom: 6.0,
        }
    }
}

impl ControllerOptions {
    /// Short debounce window for deterministic tests
    pub fn for_testing() -> Self {
        Self {
            debounce_delay: Duration::from_millis(10),
            ..Default::default()
        }
    }
}

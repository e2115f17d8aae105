//! Centralized listener subscription on the map widget
//!
//! Exactly one idle listener and one click listener per mounted instance.
//! `subscribe` is idempotent: re-subscribing (for example when the map
//! instance is replaced) detaches the previous pair first. Detachment runs
//! in reverse order of attachment; attaching a new pair before removing the
//! old one is the classic duplicate-firing bug this registry exists to
//! prevent.

use crate::{
    widget::{ListenerId, MapEventKind, MapWidget},
    Result,
};

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    idle: Option<ListenerId>,
    click: Option<ListenerId>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the idle and click listeners, detaching any previous pair
    /// first.
    pub fn subscribe(&mut self, widget: &mut dyn MapWidget) -> Result<()> {
        self.unsubscribe(widget);
        self.idle = Some(widget.add_listener(MapEventKind::Idle)?);
        self.click = Some(widget.add_listener(MapEventKind::Click)?);
        Ok(())
    }

    /// Detaches both listeners in reverse order of subscription.
    ///
    /// Best-effort: a removal the widget refuses is logged and skipped so
    /// teardown always completes, and the ids are dropped either way. There
    /// is nothing useful to do with a handle the widget no longer honors.
    pub fn unsubscribe(&mut self, widget: &mut dyn MapWidget) {
        if let Some(click) = self.click.take() {
            if let Err(e) = widget.remove_listener(click) {
                log::warn!("failed to remove click listener {:?}: {}", click, e);
            }
        }
        if let Some(idle) = self.idle.take() {
            if let Err(e) = widget.remove_listener(idle) {
                log::warn!("failed to remove idle listener {:?}: {}", idle, e);
            }
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.idle.is_some() && self.click.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{LatLng, LatLngBounds};
    use crate::widget::{MarkerId, MarkerSpec};

    /// Records the order of add/remove calls and the set of live listeners
    #[derive(Default)]
    struct RecordingWidget {
        next_id: u64,
        live: Vec<(ListenerId, MapEventKind)>,
        removal_order: Vec<ListenerId>,
        fail_removals: bool,
    }

    impl MapWidget for RecordingWidget {
        fn bounds(&self) -> Result<LatLngBounds> {
            Ok(LatLngBounds::from_coords(37.40, 126.90, 37.60, 127.05))
        }

        fn add_listener(&mut self, event: MapEventKind) -> Result<ListenerId> {
            self.next_id += 1;
            let id = ListenerId(self.next_id);
            self.live.push((id, event));
            Ok(id)
        }

        fn remove_listener(&mut self, listener: ListenerId) -> Result<()> {
            self.removal_order.push(listener);
            if self.fail_removals {
                return Err(crate::MapError::Listener("removal refused".to_string()));
            }
            self.live.retain(|(id, _)| *id != listener);
            Ok(())
        }

        fn set_center(&mut self, _center: LatLng) {}
        fn set_zoom(&mut self, _zoom: f64) {}

        fn create_marker(&mut self, _spec: &MarkerSpec) -> Result<MarkerId> {
            Ok(MarkerId(0))
        }

        fn destroy_marker(&mut self, _marker: MarkerId) -> Result<()> {
            Ok(())
        }
    }

    fn count_kind(widget: &RecordingWidget, kind: MapEventKind) -> usize {
        widget.live.iter().filter(|(_, k)| *k == kind).count()
    }

    #[test]
    fn test_exactly_one_listener_per_event() {
        let mut widget = RecordingWidget::default();
        let mut registry = SubscriptionRegistry::new();

        registry.subscribe(&mut widget).unwrap();
        assert_eq!(count_kind(&widget, MapEventKind::Idle), 1);
        assert_eq!(count_kind(&widget, MapEventKind::Click), 1);

        // Re-subscribing (map instance replaced) never duplicates
        registry.subscribe(&mut widget).unwrap();
        registry.subscribe(&mut widget).unwrap();
        assert_eq!(count_kind(&widget, MapEventKind::Idle), 1);
        assert_eq!(count_kind(&widget, MapEventKind::Click), 1);
    }

    #[test]
    fn test_unsubscribe_reverse_order() {
        let mut widget = RecordingWidget::default();
        let mut registry = SubscriptionRegistry::new();

        registry.subscribe(&mut widget).unwrap();
        // idle was ListenerId(1), click ListenerId(2)
        registry.unsubscribe(&mut widget);

        assert!(widget.live.is_empty());
        assert_eq!(widget.removal_order, vec![ListenerId(2), ListenerId(1)]);
        assert!(!registry.is_subscribed());
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut widget = RecordingWidget::default();
        let mut registry = SubscriptionRegistry::new();

        registry.subscribe(&mut widget).unwrap();
        registry.unsubscribe(&mut widget);
        registry.unsubscribe(&mut widget);
        assert!(widget.live.is_empty());
        // Second unsubscribe removed nothing
        assert_eq!(widget.removal_order.len(), 2);
    }

    #[test]
    fn test_unsubscribe_survives_removal_failure() {
        let mut widget = RecordingWidget::default();
        let mut registry = SubscriptionRegistry::new();

        registry.subscribe(&mut widget).unwrap();
        widget.fail_removals = true;
        registry.unsubscribe(&mut widget);

        // Both removals were attempted and the ids dropped regardless
        assert_eq!(widget.removal_order, vec![ListenerId(2), ListenerId(1)]);
        assert!(!registry.is_subscribed());

        // A later subscribe attaches a fresh pair, nothing doubles up
        widget.fail_removals = false;
        widget.live.clear();
        registry.subscribe(&mut widget).unwrap();
        assert_eq!(count_kind(&widget, MapEventKind::Idle), 1);
        assert_eq!(count_kind(&widget, MapEventKind::Click), 1);
    }
}

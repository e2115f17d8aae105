//! Hover/select interaction state
//!
//! Tracks which cluster (by array index into the current snapshot) owns the
//! listing panel. Selection pins the panel: hover underneath never overrides
//! it, and mouse-out while something is selected does not clear it. Every
//! successful reconciliation invalidates the whole state, because the
//! referenced cluster no longer corresponds to any live marker.

use crate::widget::EventOutcome;

/// Derived display focus. `Selected` wins over `Hovering` when both a
/// selection and a hover are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Idle,
    Hovering(usize),
    Selected(usize),
}

#[derive(Debug, Default)]
pub struct InteractionState {
    hovered: Option<usize>,
    selected: Option<usize>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        match (self.selected, self.hovered) {
            (Some(ix), _) => Focus::Selected(ix),
            (None, Some(ix)) => Focus::Hovering(ix),
            (None, None) => Focus::Idle,
        }
    }

    /// Cluster index whose members the listing panel should show, if any.
    pub fn panel_cluster(&self) -> Option<usize> {
        self.selected.or(self.hovered)
    }

    pub fn pointer_entered(&mut self, index: usize) {
        self.hovered = Some(index);
    }

    /// Mouse-out. Suppressed while a selection is pinned.
    pub fn pointer_left(&mut self, index: usize) {
        if self.selected.is_some() {
            return;
        }
        if self.hovered == Some(index) {
            self.hovered = None;
        }
    }

    /// Marker click pins the panel. The click is consumed so it never
    /// reaches the map-background handler and clears itself.
    pub fn marker_clicked(&mut self, index: usize) -> EventOutcome {
        self.selected = Some(index);
        self.hovered = None;
        EventOutcome::Consumed
    }

    /// Map background click clears both hover and selection.
    pub fn map_clicked(&mut self) {
        self.selected = None;
        self.hovered = None;
    }

    /// Mandatory invalidation after reconciliation: the referenced cluster
    /// object is stale once a new snapshot lands.
    pub fn invalidate(&mut self) {
        self.selected = None;
        self.hovered = None;
    }
}

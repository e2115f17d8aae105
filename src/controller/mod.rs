//! The viewport-driven clustering controller
//!
//! Control flow: filter edits or map movement cause the widget to raise an
//! idle event → the debounced scheduler coalesces the burst → one fetch is
//! issued with the bounds and filter sampled at fire time → the result
//! passes the store's sequence gate → markers are reconciled and any
//! hover/select focus is invalidated.
//!
//! Everything here runs on the host's single event-driven thread. The only
//! suspension points are the debounce timer (driven through [`pump`]) and
//! the network fetch, which runs as a spawned task and reports back over a
//! channel.
//!
//! [`pump`]: ClusterMapController::pump

pub mod focus;
pub mod markers;
pub mod scheduler;
pub mod store;
pub mod subscriptions;

pub use focus::{Focus, InteractionState};
pub use markers::MarkerSet;
pub use scheduler::FetchScheduler;
pub use store::{ApplyOutcome, ClusterStore, FetchTicket};
pub use subscriptions::SubscriptionRegistry;

use crate::{
    core::{config::ControllerOptions, filter::FilterCriteria},
    data::{
        listing::{Cluster, Listing},
        source::ClusterSource,
    },
    prelude::{Arc, Instant},
    runtime,
    widget::{EventOutcome, MapWidget, WidgetEvent},
    MapError, Result,
};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// A resolved fetch, delivered from the spawned task back to the
/// controller's thread.
struct FetchCompletion {
    ticket: FetchTicket,
    result: Result<Vec<Cluster>>,
}

/// Owns the map widget and coordinates scheduling, fetching, marker
/// reconciliation and interaction focus for one mounted map instance.
pub struct ClusterMapController<W: MapWidget> {
    widget: W,
    options: ControllerOptions,
    filter: FilterCriteria,
    source: Arc<dyn ClusterSource>,
    scheduler: FetchScheduler,
    store: ClusterStore,
    markers: MarkerSet,
    interaction: InteractionState,
    subscriptions: SubscriptionRegistry,
    completion_tx: Sender<FetchCompletion>,
    completion_rx: Receiver<FetchCompletion>,
    error_tx: Sender<MapError>,
    error_rx: Receiver<MapError>,
    /// Handle to the most recently spawned fetch task, aborted on unmount
    fetch_handle: Option<Box<dyn runtime::AsyncHandle>>,
    mounted: bool,
}

impl<W: MapWidget> ClusterMapController<W> {
    pub fn new(widget: W, source: Arc<dyn ClusterSource>, options: ControllerOptions) -> Self {
        let (completion_tx, completion_rx) = unbounded();
        let (error_tx, error_rx) = unbounded();
        let scheduler = FetchScheduler::new(options.debounce_delay);

        Self {
            widget,
            options,
            filter: FilterCriteria::default(),
            source,
            scheduler,
            store: ClusterStore::new(),
            markers: MarkerSet::new(),
            interaction: InteractionState::new(),
            subscriptions: SubscriptionRegistry::new(),
            completion_tx,
            completion_rx,
            error_tx,
            error_rx,
            fetch_handle: None,
            mounted: false,
        }
    }

    /// Channel on which recoverable fetch errors are reported. Whether and
    /// how they are displayed is the surrounding UI layer's business.
    pub fn error_channel(&self) -> Receiver<MapError> {
        self.error_rx.clone()
    }

    /// Feeds one widget event into the controller.
    ///
    /// Returns [`EventOutcome::Consumed`] when the event was handled; the
    /// host must not forward a consumed marker click to the map-click path.
    pub fn handle_event(&mut self, event: WidgetEvent) -> Result<EventOutcome> {
        self.handle_event_at(event, Instant::now())
    }

    /// Clock-explicit variant of [`handle_event`](Self::handle_event).
    /// Hosts that drive [`pump_at`](Self::pump_at) with their own clock
    /// feed the same clock here so debounce deadlines line up.
    pub fn handle_event_at(&mut self, event: WidgetEvent, now: Instant) -> Result<EventOutcome> {
        if !self.mounted && event != WidgetEvent::Ready {
            return Ok(EventOutcome::Ignored);
        }

        match event {
            WidgetEvent::Ready => {
                self.mount()?;
                Ok(EventOutcome::Consumed)
            }
            WidgetEvent::Idle => {
                self.scheduler.trigger_at(now);
                Ok(EventOutcome::Consumed)
            }
            WidgetEvent::MapClick { .. } => {
                self.interaction.map_clicked();
                Ok(EventOutcome::Consumed)
            }
            WidgetEvent::MarkerClick { marker } => match self.markers.cluster_index(marker) {
                Some(index) => Ok(self.interaction.marker_clicked(index)),
                None => Ok(EventOutcome::Ignored),
            },
            WidgetEvent::MarkerEnter { marker } => match self.markers.cluster_index(marker) {
                Some(index) => {
                    self.interaction.pointer_entered(index);
                    Ok(EventOutcome::Consumed)
                }
                None => Ok(EventOutcome::Ignored),
            },
            WidgetEvent::MarkerLeave { marker } => match self.markers.cluster_index(marker) {
                Some(index) => {
                    self.interaction.pointer_left(index);
                    Ok(EventOutcome::Consumed)
                }
                None => Ok(EventOutcome::Ignored),
            },
        }
    }

    /// Attaches listeners and issues the first fetch without debouncing.
    fn mount(&mut self) -> Result<()> {
        self.subscriptions.subscribe(&mut self.widget)?;
        self.mounted = true;
        self.refresh_now();
        Ok(())
    }

    /// Tears down markers, listeners, any pending timer and any in-flight
    /// fetch task.
    ///
    /// Teardown is best-effort and always runs to completion: a widget that
    /// refuses a listener removal is logged and skipped. A fetch completion
    /// that already landed before the abort is dropped because the instance
    /// is no longer mounted.
    pub fn unmount(&mut self) {
        self.scheduler.cancel();
        if let Some(handle) = self.fetch_handle.take() {
            handle.cancel();
        }
        self.subscriptions.unsubscribe(&mut self.widget);
        self.markers.clear(&mut self.widget);
        self.interaction.invalidate();
        self.mounted = false;
    }

    /// Replaces the filter snapshot wholesale and schedules a refetch.
    pub fn set_filter(&mut self, filter: FilterCriteria) {
        self.set_filter_at(filter, Instant::now());
    }

    /// Clock-explicit variant of [`set_filter`](Self::set_filter).
    pub fn set_filter_at(&mut self, filter: FilterCriteria, now: Instant) {
        self.filter = filter;
        if self.mounted {
            self.scheduler.trigger_at(now);
        }
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// The panel callback: a listing inside the focused cluster was
    /// clicked. Recenters at close-up zoom, returns focus to idle, and
    /// refreshes clusters for the new viewport immediately.
    pub fn listing_clicked(&mut self, listing: &Listing) {
        if !self.mounted {
            return;
        }
        self.widget.set_center(listing.position());
        self.widget.set_zoom(self.options.close_up_zoom);
        self.interaction.invalidate();
        self.refresh_now();
    }

    /// Drives the debounce timer and applies any resolved fetches.
    /// Hosts call this from their event/frame loop.
    pub fn pump(&mut self) {
        self.pump_at(Instant::now());
    }

    /// Deterministic variant of [`pump`](Self::pump).
    pub fn pump_at(&mut self, now: Instant) {
        if self.mounted && self.scheduler.poll(now) {
            self.issue_fetch(now);
        }
        self.drain_completions();
    }

    /// Cancels any pending timer and issues a fetch right away.
    fn refresh_now(&mut self) {
        self.scheduler.trigger_immediate();
        self.issue_fetch(Instant::now());
    }

    /// Samples bounds and filter NOW and spawns the fetch. Handlers never
    /// capture these at trigger time.
    fn issue_fetch(&mut self, now: Instant) {
        let bounds = match self.widget.bounds() {
            Ok(bounds) => bounds,
            Err(MapError::NotReady) => {
                // Widget still initializing; retry after another window
                log::debug!("bounds unavailable, deferring fetch");
                self.scheduler.trigger_at(now);
                return;
            }
            Err(e) => {
                let _ = self.error_tx.send(e);
                return;
            }
        };

        let ticket = self.store.begin_fetch();
        let filter = self.filter.clone();
        let source = self.source.clone();
        let tx = self.completion_tx.clone();

        log::debug!(
            "issuing cluster fetch seq {} for ({}, {})..({}, {})",
            ticket.seq(),
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng
        );

        self.fetch_handle = Some(runtime::spawn(async move {
            let result = source.fetch_clusters(&bounds, &filter).await;
            let _ = tx.send(FetchCompletion { ticket, result });
        }));
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completion_rx.try_recv() {
            if !self.mounted {
                log::debug!(
                    "dropping fetch completion seq {} after unmount",
                    completion.ticket.seq()
                );
                continue;
            }
            match completion.result {
                Ok(clusters) => {
                    if self.store.apply(completion.ticket, clusters) == ApplyOutcome::Applied {
                        self.reconcile();
                    }
                }
                Err(e) => {
                    // Recoverable: empty snapshot for this viewport, error
                    // observable on the reporting channel
                    if self.store.apply_failure(completion.ticket) == ApplyOutcome::Applied {
                        self.reconcile();
                    }
                    log::warn!("cluster fetch failed: {}", e);
                    let _ = self.error_tx.send(e);
                }
            }
        }
    }

    /// Mirrors the store snapshot as markers and invalidates any focus that
    /// referenced the superseded snapshot.
    fn reconcile(&mut self) {
        self.markers.reconcile(&mut self.widget, self.store.clusters());
        self.interaction.invalidate();
    }

    pub fn focus(&self) -> Focus {
        self.interaction.focus()
    }

    /// Members of the cluster the listing panel should display, if any.
    pub fn focused_members(&self) -> Option<&[Listing]> {
        self.interaction
            .panel_cluster()
            .and_then(|index| self.store.get(index))
            .map(|cluster| cluster.members.as_slice())
    }

    pub fn clusters(&self) -> &[Cluster] {
        self.store.clusters()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn has_pending_fetch_timer(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }
}

//! Cluster data store with a sequence gate
//!
//! Each fetch is tagged with a monotonically increasing sequence number at
//! issue time. A result is applied only if its sequence number is the
//! highest resolved so far, so in-flight fetches that complete out of order
//! can never flicker stale data onto the map: last-issued wins, not
//! last-completed. The gate persists past unmount, which discards
//! late-arriving results for free.

use crate::data::listing::Cluster;

/// Issue-time tag for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Whether a resolving fetch made it through the sequence gate.
///
/// `Stale` is an expected control-flow outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Default)]
pub struct ClusterStore {
    clusters: Vec<Cluster>,
    next_seq: u64,
    /// Highest sequence number whose result has been applied
    applied_seq: u64,
}

impl ClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags a new fetch at issue time.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_seq += 1;
        FetchTicket { seq: self.next_seq }
    }

    /// Applies a successful result, unless a newer fetch already resolved.
    pub fn apply(&mut self, ticket: FetchTicket, clusters: Vec<Cluster>) -> ApplyOutcome {
        if ticket.seq <= self.applied_seq {
            log::debug!(
                "discarding stale fetch result (seq {} <= applied {})",
                ticket.seq,
                self.applied_seq
            );
            return ApplyOutcome::Stale;
        }
        self.applied_seq = ticket.seq;
        self.clusters = clusters;
        ApplyOutcome::Applied
    }

    /// Records a failed fetch: the snapshot becomes empty rather than
    /// showing stale clusters for the new viewport. Recovery happens via
    /// the next organic trigger, never a retry storm.
    pub fn apply_failure(&mut self, ticket: FetchTicket) -> ApplyOutcome {
        self.apply(ticket, Vec::new())
    }

    /// The most recent successfully applied snapshot.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn get(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }
}

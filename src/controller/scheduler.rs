//! Debounced fetch scheduling
//!
//! Coalesces bursts of trigger events (viewport idle notifications, filter
//! edits, programmatic recenters) into at most one fetch per quiescence
//! window. At most one timer is pending at any time; a new trigger replaces
//! any pending one. Bounds and filter are sampled by the caller when the
//! timer fires, not when it was set.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FetchScheduler {
    delay: Duration,
    deadline: Option<Instant>,
}

impl FetchScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Starts (or restarts) the debounce timer.
    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    /// Deterministic variant of [`trigger`](Self::trigger) for tests and
    /// hosts that drive their own clock.
    pub fn trigger_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Bypasses the delay for the first load and post-recenter refreshes:
    /// the caller issues the fetch itself, and any pending timer is
    /// cancelled so only one fetch results.
    pub fn trigger_immediate(&mut self) {
        self.deadline = None;
    }

    /// Clears any pending timer; no fetch fires afterwards.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the pending timer has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time remaining until the pending timer fires, if any. Hosts use this
    /// to decide how soon to pump again.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

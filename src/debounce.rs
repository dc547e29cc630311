//! Fixed-delay debouncing for bursts of edits.
//!
//! Time is passed in explicitly so callers (and tests) control the clock.

use std::time::{Duration, Instant};

/// Delay before recomputing a draft total after the last field edit
pub const PRICE_RECOMPUTE_DELAY: Duration = Duration::from_millis(100);

/// Delay before reloading a list after the last filter edit
pub const LIST_RELOAD_DELAY: Duration = Duration::from_millis(150);

/// Collapses a burst of values into the last one.
///
/// A value becomes ready once `delay` has elapsed since the most recent
/// `push`. Each push restarts the wait.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queue a value, replacing anything still pending
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value will become ready
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.delay)
    }

    /// Take the pending value if the quiet period is over
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop whatever is pending
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

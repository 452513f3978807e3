//! Ownership gate counters
//!
//! - Counters only
//! - Monotonic increase
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by an ownership pause gate
#[derive(Debug, Default)]
pub struct GateCounters {
    /// Events passed to the wrapped handler
    events_handled: AtomicU64,
    /// Events dropped while paused
    events_dropped: AtomicU64,
    /// Transitions into the paused state
    pauses: AtomicU64,
}

impl GateCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_handled(&self) {
        self.events_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_pauses(&self) {
        self.pauses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> GateCountersSnapshot {
        GateCountersSnapshot {
            events_handled: self.events_handled.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            pauses: self.pauses.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`GateCounters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GateCountersSnapshot {
    pub events_handled: u64,
    pub events_dropped: u64,
    pub pauses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = GateCounters::new();
        assert_eq!(counters.snapshot(), GateCountersSnapshot::default());
    }

    #[test]
    fn test_counters_increment() {
        let counters = GateCounters::new();
        counters.increment_handled();
        counters.increment_handled();
        counters.increment_dropped();
        counters.increment_pauses();

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.events_handled, 2);
        assert_eq!(snapshot.events_dropped, 1);
        assert_eq!(snapshot.pauses, 1);
    }
}

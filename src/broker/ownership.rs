//! Pausable namespace-bundle ownership handling
//!
//! [`OwnershipPauseGate`] wraps the handler invoked when this broker
//! becomes the owner of a namespace bundle. While paused, ownership
//! events are dropped; they are not queued and not replayed on resume.
//!
//! `pause()`, `resume()` and the ownership hook all enter the same
//! critical section. A transition therefore never interleaves with an
//! in-flight ownership event: a pause requested while an event is being
//! handled takes effect once that handling returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::observability::{log_event_with_fields, Event, GateCounters, GateCountersSnapshot};

use super::bundle::NamespaceBundle;

/// Receiver of bundle ownership notifications.
pub trait BundleOwnershipListener: Send + Sync {
    /// Called once a bundle is newly owned by this broker.
    fn on_bundle_owned(&self, bundle: &NamespaceBundle);
}

impl<F> BundleOwnershipListener for F
where
    F: Fn(&NamespaceBundle) + Send + Sync,
{
    fn on_bundle_owned(&self, bundle: &NamespaceBundle) {
        self(bundle)
    }
}

/// Whether ownership events currently reach the wrapped handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseState {
    #[default]
    Active,
    Paused,
}

#[derive(Debug, Default)]
struct GateState {
    pause: PauseState,
    /// Events dropped since the current pause began
    dropped_in_pause: u64,
}

/// On/off switch in front of a [`BundleOwnershipListener`].
#[derive(Debug)]
pub struct OwnershipPauseGate<L> {
    handler: L,
    state: Mutex<GateState>,
    /// Mirror of `state.pause`, written only while holding `state`.
    paused: AtomicBool,
    counters: GateCounters,
}

impl<L: BundleOwnershipListener> OwnershipPauseGate<L> {
    /// Wrap `handler`; the gate starts active.
    pub fn new(handler: L) -> Self {
        Self {
            handler,
            state: Mutex::new(GateState::default()),
            paused: AtomicBool::new(false),
            counters: GateCounters::new(),
        }
    }

    /// A panicking handler must not wedge the gate; the state is always
    /// a complete value, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stop forwarding ownership events. Idempotent.
    pub fn pause(&self) {
        let changed = {
            let mut state = self.lock();
            let changed = state.pause == PauseState::Active;
            if changed {
                state.pause = PauseState::Paused;
                state.dropped_in_pause = 0;
                self.paused.store(true, Ordering::Release);
                self.counters.increment_pauses();
            }
            changed
        };
        if changed {
            log_event_with_fields(Event::OwnershipPaused, &[]);
        }
    }

    /// Forward ownership events again. Idempotent.
    ///
    /// Returns how many events were dropped during the pause that just
    /// ended, or 0 if the gate was already active.
    pub fn resume(&self) -> u64 {
        let dropped = {
            let mut state = self.lock();
            if state.pause == PauseState::Active {
                return 0;
            }
            state.pause = PauseState::Active;
            self.paused.store(false, Ordering::Release);
            std::mem::take(&mut state.dropped_in_pause)
        };
        log_event_with_fields(
            Event::OwnershipResumed,
            &[("dropped_events", dropped.to_string().as_str())],
        );
        dropped
    }

    /// Current state, read without taking the lock.
    pub fn state(&self) -> PauseState {
        if self.paused.load(Ordering::Acquire) {
            PauseState::Paused
        } else {
            PauseState::Active
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state() == PauseState::Paused
    }

    pub fn counters(&self) -> GateCountersSnapshot {
        self.counters.snapshot()
    }

    pub fn handler(&self) -> &L {
        &self.handler
    }
}

impl<L: BundleOwnershipListener> BundleOwnershipListener for OwnershipPauseGate<L> {
    fn on_bundle_owned(&self, bundle: &NamespaceBundle) {
        let handled = {
            let mut state = self.lock();
            match state.pause {
                PauseState::Paused => {
                    state.dropped_in_pause += 1;
                    self.counters.increment_dropped();
                    false
                }
                PauseState::Active => {
                    // Runs to completion while holding the lock.
                    self.handler.on_bundle_owned(bundle);
                    self.counters.increment_handled();
                    true
                }
            }
        };

        let event = if handled {
            Event::OwnershipEventHandled
        } else {
            Event::OwnershipEventDropped
        };
        log_event_with_fields(event, &[("bundle", bundle.to_string().as_str())]);
    }
}

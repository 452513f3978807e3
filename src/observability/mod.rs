//! Observability
//!
//! Provides:
//! - Structured logging (JSON, one line per event, stderr)
//! - Typed events
//! - Ownership gate counters
//!
//! Observability is read-only: it never changes the outcome of a command
//! or of an ownership event.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{GateCounters, GateCountersSnapshot};

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}

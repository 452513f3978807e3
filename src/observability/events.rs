//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Command dispatch
    /// Command validated and about to run
    CommandDispatch,
    /// Command rejected before any remote call
    CommandRejected,

    // Admin service
    /// Request sent to the admin service
    AdminRequest,
    /// Successful response received
    AdminResponse,
    /// Request failed in transport or on the server
    AdminFailed,

    // Ownership gate
    /// Ownership handling paused
    OwnershipPaused,
    /// Ownership handling resumed
    OwnershipResumed,
    /// Ownership event dropped while paused
    OwnershipEventDropped,
    /// Ownership event passed to the wrapped handler
    OwnershipEventHandled,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::CommandDispatch => "COMMAND_DISPATCH",
            Event::CommandRejected => "COMMAND_REJECTED",

            Event::AdminRequest => "ADMIN_REQUEST",
            Event::AdminResponse => "ADMIN_RESPONSE",
            Event::AdminFailed => "ADMIN_FAILED",

            Event::OwnershipPaused => "OWNERSHIP_PAUSED",
            Event::OwnershipResumed => "OWNERSHIP_RESUMED",
            Event::OwnershipEventDropped => "OWNERSHIP_EVENT_DROPPED",
            Event::OwnershipEventHandled => "OWNERSHIP_EVENT_HANDLED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::CommandRejected | Event::AdminFailed | Event::OwnershipEventDropped => {
                Severity::Warn
            }
            Event::OwnershipEventHandled => Severity::Trace,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

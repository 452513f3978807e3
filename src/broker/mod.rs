//! Broker-side ownership control
//!
//! Provides the namespace bundle identifier and a gate that can suspend
//! bundle-ownership handling at runtime.

mod bundle;
mod ownership;

pub use bundle::{BundleParseError, NamespaceBundle};
pub use ownership::{BundleOwnershipListener, OwnershipPauseGate, PauseState};

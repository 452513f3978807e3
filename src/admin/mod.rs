//! Admin service client
//!
//! The command layer only sees the [`TransactionsAdmin`] boundary; the
//! REST transport is one implementation of it.

mod client;
mod config;
mod http;

pub use client::TransactionsAdmin;
pub use config::AdminConfig;
pub use http::HttpTransactionsAdmin;

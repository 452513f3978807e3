//! txnadmin - Transaction coordination admin tooling
//!
//! - `transactions`: operator commands for coordinators, pending-ack stores
//!   and transaction buffers, dispatched from a command table
//! - `admin`: the admin service boundary and its REST transport
//! - `broker`: pausable namespace-bundle ownership handling
//! - `observability`: structured logging and counters
//! - `cli`: the `txnadmin` command line

pub mod admin;
pub mod broker;
pub mod cli;
pub mod observability;
pub mod transactions;

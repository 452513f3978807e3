//! CLI module
//!
//! Provides the `txnadmin` command line:
//! - global options: configuration file, admin URL, auth token, verbosity
//! - `transactions <command>`: the transaction admin command table

mod args;
mod commands;
mod errors;
mod io;

pub use args::{build_cli, Cli, GlobalArgs};
pub use commands::{execute, load_config, run, run_from};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_result};

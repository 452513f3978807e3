//! txnadmin CLI entry point
//!
//! Minimal entrypoint that:
//! 1. Parses CLI arguments and dispatches (via cli::run)
//! 2. Prints errors to stderr
//! 3. Exits non-zero on failure
//!
//! All logic is delegated to the CLI module.

use txnadmin::cli;

fn main() {
    if let Err(e) = cli::run() {
        cli::write_error(&e);
        std::process::exit(e.exit_code());
    }
}

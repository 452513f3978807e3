//! CLI argument definitions using clap
//!
//! txnadmin [--config <path>] [--admin-url <url>] [--auth-token <token>] [-v]
//!          transactions <command> [flags]
//!
//! The `transactions` group is generated from the command table.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, Args, FromArgMatches};

use crate::transactions::CommandDispatcher;

/// Options shared by every command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Path to a JSON configuration file
    #[arg(long, global = true, env = "TXNADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Admin service URL, overrides the configuration file
    #[arg(long, global = true, env = "TXNADMIN_ADMIN_URL")]
    pub admin_url: Option<String>,

    /// Bearer token for the admin service, overrides the configuration file
    #[arg(long, global = true, env = "TXNADMIN_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Log at INFO level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Parsed command line
#[derive(Debug, Clone)]
pub struct Cli {
    pub globals: GlobalArgs,
    pub matches: ArgMatches,
}

/// Full command-line definition
pub fn build_cli(dispatcher: &CommandDispatcher) -> clap::Command {
    let root = clap::Command::new("txnadmin")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Transaction coordination admin tool")
        .subcommand_required(true)
        .arg_required_else_help(true);
    GlobalArgs::augment_args(root).subcommand(dispatcher.clap_command())
}

impl Cli {
    /// Parse `args` (including the binary name)
    pub fn try_parse_from<I, T>(dispatcher: &CommandDispatcher, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = build_cli(dispatcher).try_get_matches_from(args)?;
        let globals = GlobalArgs::from_arg_matches(&matches)?;
        Ok(Self { globals, matches })
    }
}

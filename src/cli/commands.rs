//! CLI command execution
//!
//! The CLI is a thin client: it resolves configuration, hands the
//! selected subcommand to the dispatcher and prints the outcome.

use std::ffi::OsString;
use std::io::{self, Write};

use crate::admin::{AdminConfig, HttpTransactionsAdmin, TransactionsAdmin};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::transactions::{CommandDispatcher, TRANSACTIONS_GROUP};

use super::args::{Cli, GlobalArgs};
use super::errors::{CliError, CliResult};
use super::io::write_result;

/// Resolve configuration: file (or defaults), then command-line overrides
pub fn load_config(globals: &GlobalArgs) -> CliResult<AdminConfig> {
    let mut config = match &globals.config {
        Some(path) => AdminConfig::load(path).map_err(CliError::config_error)?,
        None => AdminConfig::default(),
    };

    if let Some(url) = &globals.admin_url {
        config.web_service_url = url.clone();
    }
    if let Some(token) = &globals.auth_token {
        config.auth_token = Some(token.clone());
    }
    if globals.verbose {
        config.log_level = config.log_level.min(Severity::Info);
    }

    config.validate().map_err(CliError::config_error)?;
    Ok(config)
}

/// Parse the process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_from(std::env::args_os())
}

/// Parse `args` (including the binary name) and run the selected command
pub fn run_from<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let dispatcher = CommandDispatcher::transactions();
    let cli = match Cli::try_parse_from(&dispatcher, args) {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => {
            e.print()?;
            return Ok(());
        }
        Err(e) => return Err(CliError::usage(e.render().to_string().trim_end())),
    };

    let config = load_config(&cli.globals)?;
    Logger::set_min_severity(config.log_level);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("web_service_url", config.web_service_url.as_str())],
    );

    let admin = HttpTransactionsAdmin::new(&config)?;
    let mut stdout = io::stdout();
    execute(&cli, &dispatcher, &admin, &mut stdout)
}

/// Run the command selected in `cli` against `admin`, writing the result to `out`
pub fn execute<W: Write>(
    cli: &Cli,
    dispatcher: &CommandDispatcher,
    admin: &dyn TransactionsAdmin,
    out: &mut W,
) -> CliResult<()> {
    match cli.matches.subcommand() {
        Some((TRANSACTIONS_GROUP, group)) => {
            let result = dispatcher.dispatch_matches(group, admin)?;
            write_result(out, &result)
        }
        Some((other, _)) => Err(CliError::usage(format!("unknown command group: {}", other))),
        None => Err(CliError::usage("no command given")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(&GlobalArgs::default()).unwrap();
        assert_eq!(config, AdminConfig::default());
    }

    #[test]
    fn test_load_config_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"web_service_url": "http://from-file:8080", "auth_token": "file-token"}}"#
        )
        .unwrap();

        let globals = GlobalArgs {
            config: Some(file.path().to_path_buf()),
            admin_url: Some("https://from-flag:8443".to_string()),
            auth_token: None,
            verbose: true,
        };
        let config = load_config(&globals).unwrap();
        assert_eq!(config.web_service_url, "https://from-flag:8443");
        assert_eq!(config.auth_token.as_deref(), Some("file-token"));
        assert_eq!(config.log_level, Severity::Info);
    }

    #[test]
    fn test_load_config_rejects_bad_override() {
        let globals = GlobalArgs {
            admin_url: Some("broker:8080".to_string()),
            ..Default::default()
        };
        let err = load_config(&globals).unwrap_err();
        assert_eq!(err.code_str(), "TXN_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_missing_config_file() {
        let globals = GlobalArgs {
            config: Some("/nonexistent/txnadmin.json".into()),
            ..Default::default()
        };
        assert!(load_config(&globals).is_err());
    }
}

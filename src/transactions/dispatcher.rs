//! Table-driven command dispatcher
//!
//! Maps command names to [`CommandHandler`]s. One invocation selects one
//! handler, materializes its flags through the parameter codec and runs
//! the resulting request against the admin boundary.

use std::collections::BTreeMap;

use clap::ArgMatches;
use serde_json::Value;

use crate::admin::TransactionsAdmin;
use crate::observability::{log_event_with_fields, Event};

use super::commands::{transaction_commands, CommandHandler, FlagValues, TransactionsRequest};
use super::errors::{TxnAdminError, TxnAdminResult, ValidationError};

/// Name of the command group on the command line
pub const TRANSACTIONS_GROUP: &str = "transactions";

/// Registry of named commands.
#[derive(Debug, Clone, Default)]
pub struct CommandDispatcher {
    handlers: BTreeMap<&'static str, CommandHandler>,
}

impl CommandDispatcher {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full transaction command catalog
    pub fn transactions() -> Self {
        let mut dispatcher = Self::new();
        for handler in transaction_commands() {
            dispatcher.register(handler);
        }
        dispatcher
    }

    /// Register `handler`, returning any handler previously under its name.
    pub fn register(&mut self, handler: CommandHandler) -> Option<CommandHandler> {
        self.handlers.insert(handler.name(), handler)
    }

    pub fn handler(&self, name: &str) -> Option<&CommandHandler> {
        self.handlers.get(name)
    }

    pub fn command_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// clap definition of the command group.
    ///
    /// Unregistered names are let through so that the dispatcher reports
    /// them as unknown commands.
    pub fn clap_command(&self) -> clap::Command {
        self.handlers.values().fold(
            clap::Command::new(TRANSACTIONS_GROUP)
                .about("Operations on transactions")
                .subcommand_required(true)
                .allow_external_subcommands(true),
            |group, handler| group.subcommand(handler.spec().to_clap()),
        )
    }

    fn lookup(&self, name: &str) -> TxnAdminResult<&CommandHandler> {
        self.handlers
            .get(name)
            .ok_or_else(|| TxnAdminError::UnknownCommand(name.to_string()))
    }

    /// Parse the flag arguments of command `name`.
    pub fn parse_flags<I, T>(&self, name: &str, args: I) -> TxnAdminResult<FlagValues>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let handler = self.lookup(name)?;
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let matches = handler
            .spec()
            .to_clap()
            .no_binary_name(true)
            .try_get_matches_from(args)
            .map_err(|e| ValidationError::Usage(e.to_string().trim_end().to_string()))?;
        Ok(FlagValues::from_matches(handler.spec(), &matches))
    }

    /// Validate an invocation (`<command> [flags...]`) without executing it.
    pub fn validate<I, T>(&self, args: I) -> TxnAdminResult<TransactionsRequest>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let name: String = args
            .next()
            .ok_or_else(|| ValidationError::Usage("no command given".to_string()))?;
        let flags = self.parse_flags(&name, args)?;
        self.lookup(&name)?.validate(&flags)
    }

    /// Run one invocation (`<command> [flags...]`) against `admin`.
    pub fn dispatch<I, T>(&self, args: I, admin: &dyn TransactionsAdmin) -> TxnAdminResult<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let outcome = self.validate(args);
        self.execute(outcome, admin)
    }

    /// Run the subcommand selected in `matches`, the matches of the group
    /// produced by [`CommandDispatcher::clap_command`].
    pub fn dispatch_matches(
        &self,
        matches: &ArgMatches,
        admin: &dyn TransactionsAdmin,
    ) -> TxnAdminResult<Value> {
        let outcome = match matches.subcommand() {
            Some((name, sub_matches)) => self
                .lookup(name)
                .and_then(|handler| {
                    handler.validate(&FlagValues::from_matches(handler.spec(), sub_matches))
                }),
            None => Err(ValidationError::Usage("no command given".to_string()).into()),
        };
        self.execute(outcome, admin)
    }

    fn execute(
        &self,
        outcome: TxnAdminResult<TransactionsRequest>,
        admin: &dyn TransactionsAdmin,
    ) -> TxnAdminResult<Value> {
        let request = outcome.map_err(|err| {
            log_event_with_fields(
                Event::CommandRejected,
                &[("code", err.code()), ("error", err.to_string().as_str())],
            );
            err
        })?;
        log_event_with_fields(Event::CommandDispatch, &[("command", request.command_name())]);
        request.execute(admin)
    }
}

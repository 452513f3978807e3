//! Transaction admin command definitions
//!
//! The command set is closed: each command declares its flag schema and
//! materializes exactly one [`TransactionsRequest`]. A request maps to one
//! admin call, or to one of two alternative calls selected by an optional
//! coordinator id.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use clap::{Arg, ArgAction, ArgMatches};
use serde_json::Value;

use crate::admin::TransactionsAdmin;

use super::codec::ParameterCodec;
use super::errors::TxnAdminResult;
use super::types::{CoordinatorSelector, Position, TopicName, TransactionId};

/// How a flag is written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Present or absent, no value
    Switch,
    /// Free text
    Text,
    /// Integer; a negative number is read as a value, not as a flag
    Integer,
    /// Relative time expression; only a negative number is read as a value,
    /// so a following flag is never taken for the time
    Time,
}

/// One flag of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub id: &'static str,
    pub short: char,
    pub long: &'static str,
    pub help: &'static str,
    pub kind: FlagKind,
    pub required: bool,
    pub default: Option<&'static str>,
}

impl FlagSpec {
    const fn new(short: char, long: &'static str, kind: FlagKind, help: &'static str) -> Self {
        Self {
            id: long,
            short,
            long,
            help,
            kind,
            required: false,
            default: None,
        }
    }

    const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    /// Operator-facing name, e.g. `-t/--topic`
    pub fn display_name(&self) -> String {
        format!("-{}/--{}", self.short, self.long)
    }

    /// Requiredness is left to the codec so that a missing flag is
    /// reported by name before any remote call.
    pub fn to_arg(&self) -> Arg {
        let help = if self.required {
            format!("{} (required)", self.help)
        } else {
            self.help.to_string()
        };
        let arg = Arg::new(self.id)
            .short(self.short)
            .long(self.long)
            .help(help);
        let arg = match self.kind {
            FlagKind::Switch => arg.action(ArgAction::SetTrue),
            FlagKind::Text => arg.action(ArgAction::Set),
            FlagKind::Integer | FlagKind::Time => {
                arg.action(ArgAction::Set).allow_negative_numbers(true)
            }
        };
        match self.default {
            Some(value) => arg.default_value(value),
            None => arg,
        }
    }
}

/// Name, description and flag schema of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub flags: Vec<FlagSpec>,
}

impl CommandSpec {
    pub fn flag(&self, id: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.id == id)
    }

    pub fn to_clap(&self) -> clap::Command {
        self.flags.iter().fold(
            clap::Command::new(self.name).about(self.about),
            |cmd, flag| cmd.arg(flag.to_arg()),
        )
    }
}

/// Raw flag values of one invocation, keyed by flag id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    values: BTreeMap<String, String>,
    switches: BTreeSet<String>,
}

impl FlagValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    pub fn with_switch(mut self, id: impl Into<String>) -> Self {
        self.switches.insert(id.into());
        self
    }

    /// Collect the values matched by clap for `spec`.
    pub fn from_matches(spec: &CommandSpec, matches: &ArgMatches) -> Self {
        let mut flags = Self::new();
        for flag in &spec.flags {
            match flag.kind {
                FlagKind::Switch => {
                    if matches.get_flag(flag.id) {
                        flags.switches.insert(flag.id.to_string());
                    }
                }
                _ => {
                    if let Some(value) = matches.get_one::<String>(flag.id) {
                        flags.values.insert(flag.id.to_string(), value.clone());
                    }
                }
            }
        }
        flags
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn switch(&self, id: &str) -> bool {
        self.switches.contains(id)
    }
}

/// A fully validated transaction admin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionsRequest {
    CoordinatorStats {
        coordinator: CoordinatorSelector,
    },
    TransactionBufferStats {
        topic: TopicName,
        low_water_marks: bool,
    },
    PendingAckStats {
        topic: TopicName,
        subscription: String,
        low_water_marks: bool,
    },
    TransactionInPendingAckStats {
        txn_id: TransactionId,
        topic: TopicName,
        subscription: String,
    },
    TransactionInBufferStats {
        txn_id: TransactionId,
        topic: TopicName,
    },
    TransactionMetadata {
        txn_id: TransactionId,
    },
    SlowTransactions {
        coordinator: CoordinatorSelector,
        timeout: Duration,
    },
    CoordinatorInternalStats {
        coordinator_id: u32,
        metadata: bool,
    },
    PendingAckInternalStats {
        topic: TopicName,
        subscription: String,
        metadata: bool,
    },
    ScaleTransactionCoordinators {
        replicas: u32,
    },
    PositionStatsInPendingAck {
        topic: TopicName,
        subscription: String,
        position: Position,
    },
}

impl TransactionsRequest {
    pub fn command_name(&self) -> &'static str {
        match self {
            TransactionsRequest::CoordinatorStats { .. } => COORDINATOR_STATS,
            TransactionsRequest::TransactionBufferStats { .. } => TRANSACTION_BUFFER_STATS,
            TransactionsRequest::PendingAckStats { .. } => PENDING_ACK_STATS,
            TransactionsRequest::TransactionInPendingAckStats { .. } => {
                TRANSACTION_IN_PENDING_ACK_STATS
            }
            TransactionsRequest::TransactionInBufferStats { .. } => TRANSACTION_IN_BUFFER_STATS,
            TransactionsRequest::TransactionMetadata { .. } => TRANSACTION_METADATA,
            TransactionsRequest::SlowTransactions { .. } => SLOW_TRANSACTIONS,
            TransactionsRequest::CoordinatorInternalStats { .. } => COORDINATOR_INTERNAL_STATS,
            TransactionsRequest::PendingAckInternalStats { .. } => PENDING_ACK_INTERNAL_STATS,
            TransactionsRequest::ScaleTransactionCoordinators { .. } => {
                SCALE_TRANSACTION_COORDINATORS
            }
            TransactionsRequest::PositionStatsInPendingAck { .. } => POSITION_STATS_IN_PENDING_ACK,
        }
    }

    /// Perform the single admin call this request stands for.
    pub fn execute(&self, admin: &dyn TransactionsAdmin) -> TxnAdminResult<Value> {
        match self {
            TransactionsRequest::CoordinatorStats { coordinator } => match coordinator {
                CoordinatorSelector::Single(id) => admin.coordinator_stats_by_id(*id),
                CoordinatorSelector::All => admin.coordinator_stats(),
            },
            TransactionsRequest::TransactionBufferStats {
                topic,
                low_water_marks,
            } => admin.transaction_buffer_stats(topic, *low_water_marks),
            TransactionsRequest::PendingAckStats {
                topic,
                subscription,
                low_water_marks,
            } => admin.pending_ack_stats(topic, subscription, *low_water_marks),
            TransactionsRequest::TransactionInPendingAckStats {
                txn_id,
                topic,
                subscription,
            } => admin.transaction_in_pending_ack_stats(*txn_id, topic, subscription),
            TransactionsRequest::TransactionInBufferStats { txn_id, topic } => {
                admin.transaction_in_buffer_stats(*txn_id, topic)
            }
            TransactionsRequest::TransactionMetadata { txn_id } => {
                admin.transaction_metadata(*txn_id)
            }
            TransactionsRequest::SlowTransactions {
                coordinator,
                timeout,
            } => match coordinator {
                CoordinatorSelector::Single(id) => {
                    admin.slow_transactions_by_coordinator(*id, *timeout)
                }
                CoordinatorSelector::All => admin.slow_transactions(*timeout),
            },
            TransactionsRequest::CoordinatorInternalStats {
                coordinator_id,
                metadata,
            } => admin.coordinator_internal_stats(*coordinator_id, *metadata),
            TransactionsRequest::PendingAckInternalStats {
                topic,
                subscription,
                metadata,
            } => admin.pending_ack_internal_stats(topic, subscription, *metadata),
            TransactionsRequest::ScaleTransactionCoordinators { replicas } => admin
                .scale_transaction_coordinators(*replicas)
                .map(|()| Value::Null),
            TransactionsRequest::PositionStatsInPendingAck {
                topic,
                subscription,
                position,
            } => admin.position_stats_in_pending_ack(topic, subscription, *position),
        }
    }
}

pub const COORDINATOR_STATS: &str = "coordinator-stats";
pub const TRANSACTION_BUFFER_STATS: &str = "transaction-buffer-stats";
pub const PENDING_ACK_STATS: &str = "pending-ack-stats";
pub const TRANSACTION_IN_PENDING_ACK_STATS: &str = "transaction-in-pending-ack-stats";
pub const TRANSACTION_IN_BUFFER_STATS: &str = "transaction-in-buffer-stats";
pub const TRANSACTION_METADATA: &str = "transaction-metadata";
pub const SLOW_TRANSACTIONS: &str = "slow-transactions";
pub const COORDINATOR_INTERNAL_STATS: &str = "coordinator-internal-stats";
pub const PENDING_ACK_INTERNAL_STATS: &str = "pending-ack-internal-stats";
pub const SCALE_TRANSACTION_COORDINATORS: &str = "scale-transactionCoordinators";
pub const POSITION_STATS_IN_PENDING_ACK: &str = "position-stats-in-pending-ack";

/// Default threshold for `slow-transactions`
pub const DEFAULT_SLOW_TIMEOUT: &str = "1s";

/// A registered command: its schema and the parser producing its request.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    spec: CommandSpec,
    parse: fn(&ParameterCodec<'_>) -> TxnAdminResult<TransactionsRequest>,
}

impl CommandHandler {
    pub fn new(
        spec: CommandSpec,
        parse: fn(&ParameterCodec<'_>) -> TxnAdminResult<TransactionsRequest>,
    ) -> Self {
        Self { spec, parse }
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Materialize the typed request. Never touches the admin service.
    pub fn validate(&self, flags: &FlagValues) -> TxnAdminResult<TransactionsRequest> {
        (self.parse)(&ParameterCodec::new(&self.spec, flags))
    }

    /// Validate, then execute against `admin`.
    pub fn execute(
        &self,
        flags: &FlagValues,
        admin: &dyn TransactionsAdmin,
    ) -> TxnAdminResult<Value> {
        self.validate(flags)?.execute(admin)
    }
}

fn topic_flag() -> FlagSpec {
    FlagSpec::new('t', "topic", FlagKind::Text, "The topic name").required()
}

fn sub_name_flag() -> FlagSpec {
    FlagSpec::new('s', "sub-name", FlagKind::Text, "The subscription name").required()
}

fn subscription_name_flag() -> FlagSpec {
    FlagSpec::new('s', "subscription-name", FlagKind::Text, "Subscription name").required()
}

fn most_sig_bits_flag() -> FlagSpec {
    FlagSpec::new('m', "most-sig-bits", FlagKind::Integer, "The most sig bits").required()
}

fn least_sig_bits_flag() -> FlagSpec {
    FlagSpec::new('l', "least-sig-bits", FlagKind::Integer, "The least sig bits").required()
}

fn optional_coordinator_flag() -> FlagSpec {
    FlagSpec::new('c', "coordinator-id", FlagKind::Integer, "The coordinator id")
}

fn metadata_flag() -> FlagSpec {
    FlagSpec::new('m', "metadata", FlagKind::Switch, "Flag to include ledger metadata")
}

/// The full transaction command catalog.
pub fn transaction_commands() -> Vec<CommandHandler> {
    vec![
        CommandHandler::new(
            CommandSpec {
                name: COORDINATOR_STATS,
                about: "Get transaction coordinator stats",
                flags: vec![optional_coordinator_flag()],
            },
            |codec| {
                Ok(TransactionsRequest::CoordinatorStats {
                    coordinator: codec.coordinator_selector("coordinator-id")?,
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: TRANSACTION_BUFFER_STATS,
                about: "Get transaction buffer stats",
                flags: vec![
                    topic_flag(),
                    FlagSpec::new(
                        'l',
                        "low-water-mark",
                        FlagKind::Switch,
                        "Include the low-water marks stored in the transaction buffer",
                    ),
                ],
            },
            |codec| {
                Ok(TransactionsRequest::TransactionBufferStats {
                    topic: codec.topic("topic")?,
                    low_water_marks: codec.switch("low-water-mark"),
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: PENDING_ACK_STATS,
                about: "Get transaction pending ack stats",
                flags: vec![
                    topic_flag(),
                    sub_name_flag(),
                    FlagSpec::new(
                        'l',
                        "low-water-mark",
                        FlagKind::Switch,
                        "Include the low-water marks stored in the pending ack store",
                    ),
                ],
            },
            |codec| {
                Ok(TransactionsRequest::PendingAckStats {
                    topic: codec.topic("topic")?,
                    subscription: codec.required_text("sub-name")?,
                    low_water_marks: codec.switch("low-water-mark"),
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: TRANSACTION_IN_PENDING_ACK_STATS,
                about: "Get transaction in pending ack stats",
                flags: vec![
                    most_sig_bits_flag(),
                    least_sig_bits_flag(),
                    topic_flag(),
                    sub_name_flag(),
                ],
            },
            |codec| {
                Ok(TransactionsRequest::TransactionInPendingAckStats {
                    txn_id: codec.transaction_id("most-sig-bits", "least-sig-bits")?,
                    topic: codec.topic("topic")?,
                    subscription: codec.required_text("sub-name")?,
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: TRANSACTION_IN_BUFFER_STATS,
                about: "Get transaction in buffer stats",
                flags: vec![most_sig_bits_flag(), least_sig_bits_flag(), topic_flag()],
            },
            |codec| {
                Ok(TransactionsRequest::TransactionInBufferStats {
                    txn_id: codec.transaction_id("most-sig-bits", "least-sig-bits")?,
                    topic: codec.topic("topic")?,
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: TRANSACTION_METADATA,
                about: "Get transaction metadata",
                flags: vec![most_sig_bits_flag(), least_sig_bits_flag()],
            },
            |codec| {
                Ok(TransactionsRequest::TransactionMetadata {
                    txn_id: codec.transaction_id("most-sig-bits", "least-sig-bits")?,
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: SLOW_TRANSACTIONS,
                about: "Get slow transactions",
                flags: vec![
                    optional_coordinator_flag(),
                    FlagSpec::new(
                        't',
                        "time",
                        FlagKind::Time,
                        "The transaction timeout time (eg: 1s, 10s, 1m, 5h, 3d)",
                    )
                    .default_value(DEFAULT_SLOW_TIMEOUT),
                ],
            },
            |codec| {
                Ok(TransactionsRequest::SlowTransactions {
                    coordinator: codec.coordinator_selector("coordinator-id")?,
                    timeout: codec.relative_time("time")?,
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: COORDINATOR_INTERNAL_STATS,
                about: "Get transaction coordinator internal stats",
                flags: vec![
                    FlagSpec::new('c', "coordinator-id", FlagKind::Integer, "The coordinator id")
                        .required(),
                    metadata_flag(),
                ],
            },
            |codec| {
                Ok(TransactionsRequest::CoordinatorInternalStats {
                    coordinator_id: codec.coordinator_id("coordinator-id")?,
                    metadata: codec.switch("metadata"),
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: PENDING_ACK_INTERNAL_STATS,
                about: "Get pending ack internal stats",
                flags: vec![topic_flag(), subscription_name_flag(), metadata_flag()],
            },
            |codec| {
                Ok(TransactionsRequest::PendingAckInternalStats {
                    topic: codec.topic("topic")?,
                    subscription: codec.required_text("subscription-name")?,
                    metadata: codec.switch("metadata"),
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: SCALE_TRANSACTION_COORDINATORS,
                about: "Update the scale of transaction coordinators",
                flags: vec![FlagSpec::new(
                    'r',
                    "replicas",
                    FlagKind::Integer,
                    "The scale of the transaction coordinators",
                )
                .required()],
            },
            |codec| {
                Ok(TransactionsRequest::ScaleTransactionCoordinators {
                    replicas: codec.replicas("replicas")?,
                })
            },
        ),
        CommandHandler::new(
            CommandSpec {
                name: POSITION_STATS_IN_PENDING_ACK,
                about: "Get the position stats in transaction pending ack",
                flags: vec![
                    topic_flag(),
                    subscription_name_flag(),
                    FlagSpec::new(
                        'l',
                        "ledger-id",
                        FlagKind::Integer,
                        "Ledger ID of the position",
                    )
                    .required(),
                    FlagSpec::new('e', "entry-id", FlagKind::Integer, "Entry ID of the position")
                        .required(),
                    FlagSpec::new(
                        'b',
                        "batch-index",
                        FlagKind::Integer,
                        "Batch index of the position",
                    ),
                ],
            },
            |codec| {
                Ok(TransactionsRequest::PositionStatsInPendingAck {
                    topic: codec.topic("topic")?,
                    subscription: codec.required_text("subscription-name")?,
                    position: codec.position("ledger-id", "entry-id", "batch-index")?,
                })
            },
        ),
    ]
}

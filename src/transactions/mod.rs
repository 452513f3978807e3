//! Transaction administration commands
//!
//! Provides:
//! - typed parameters (transaction ids, positions, topics, coordinators)
//! - the parameter codec turning flag text into those types
//! - the command catalog and its table-driven dispatcher
//!
//! Validation always completes before the admin service is contacted.

mod codec;
mod commands;
mod dispatcher;
mod errors;
mod relative_time;
mod types;

pub use codec::ParameterCodec;
pub use commands::{
    transaction_commands, CommandHandler, CommandSpec, FlagKind, FlagSpec, FlagValues,
    TransactionsRequest, COORDINATOR_INTERNAL_STATS, COORDINATOR_STATS, DEFAULT_SLOW_TIMEOUT,
    PENDING_ACK_INTERNAL_STATS, PENDING_ACK_STATS, POSITION_STATS_IN_PENDING_ACK,
    SCALE_TRANSACTION_COORDINATORS, SLOW_TRANSACTIONS, TRANSACTION_BUFFER_STATS,
    TRANSACTION_IN_BUFFER_STATS, TRANSACTION_IN_PENDING_ACK_STATS, TRANSACTION_METADATA,
};
pub use dispatcher::{CommandDispatcher, TRANSACTIONS_GROUP};
pub use errors::{ErrorDomain, TxnAdminError, TxnAdminResult, ValidationError};
pub use relative_time::{parse_relative_time, RelativeTimeError};
pub use types::{CoordinatorSelector, Position, TopicDomain, TopicName, TransactionId};

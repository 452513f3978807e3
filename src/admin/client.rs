//! Admin service boundary
//!
//! Each method corresponds to exactly one remote operation. Results are
//! opaque JSON documents; this crate only prints them.

use std::time::Duration;

use serde_json::Value;

use crate::transactions::{Position, TopicName, TransactionId, TxnAdminResult};

/// Remote transaction administration.
pub trait TransactionsAdmin: Send + Sync {
    /// Stats of every coordinator
    fn coordinator_stats(&self) -> TxnAdminResult<Value>;

    /// Stats of a single coordinator
    fn coordinator_stats_by_id(&self, coordinator_id: u32) -> TxnAdminResult<Value>;

    fn transaction_buffer_stats(
        &self,
        topic: &TopicName,
        low_water_marks: bool,
    ) -> TxnAdminResult<Value>;

    fn pending_ack_stats(
        &self,
        topic: &TopicName,
        subscription: &str,
        low_water_marks: bool,
    ) -> TxnAdminResult<Value>;

    fn transaction_in_pending_ack_stats(
        &self,
        txn_id: TransactionId,
        topic: &TopicName,
        subscription: &str,
    ) -> TxnAdminResult<Value>;

    fn transaction_in_buffer_stats(
        &self,
        txn_id: TransactionId,
        topic: &TopicName,
    ) -> TxnAdminResult<Value>;

    fn transaction_metadata(&self, txn_id: TransactionId) -> TxnAdminResult<Value>;

    /// Transactions open for longer than `timeout`, across all coordinators
    fn slow_transactions(&self, timeout: Duration) -> TxnAdminResult<Value>;

    /// Transactions open for longer than `timeout` on one coordinator
    fn slow_transactions_by_coordinator(
        &self,
        coordinator_id: u32,
        timeout: Duration,
    ) -> TxnAdminResult<Value>;

    fn coordinator_internal_stats(
        &self,
        coordinator_id: u32,
        metadata: bool,
    ) -> TxnAdminResult<Value>;

    fn pending_ack_internal_stats(
        &self,
        topic: &TopicName,
        subscription: &str,
        metadata: bool,
    ) -> TxnAdminResult<Value>;

    /// Resize the coordinator pool
    fn scale_transaction_coordinators(&self, replicas: u32) -> TxnAdminResult<()>;

    fn position_stats_in_pending_ack(
        &self,
        topic: &TopicName,
        subscription: &str,
        position: Position,
    ) -> TxnAdminResult<Value>;
}

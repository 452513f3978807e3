#![allow(dead_code)]

pub mod server;

use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};
use txnadmin::admin::TransactionsAdmin;
use txnadmin::transactions::{Position, TopicName, TransactionId, TxnAdminError, TxnAdminResult};

/// One call received by [`RecordingAdmin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCall {
    CoordinatorStats,
    CoordinatorStatsById(u32),
    TransactionBufferStats(String, bool),
    PendingAckStats(String, String, bool),
    TransactionInPendingAckStats(TransactionId, String, String),
    TransactionInBufferStats(TransactionId, String),
    TransactionMetadata(TransactionId),
    SlowTransactions(Duration),
    SlowTransactionsByCoordinator(u32, Duration),
    CoordinatorInternalStats(u32, bool),
    PendingAckInternalStats(String, String, bool),
    ScaleTransactionCoordinators(u32),
    PositionStatsInPendingAck(String, String, Position),
}

/// Admin double that records every call and answers with a fixed document
/// or a transport failure.
#[derive(Debug, Default)]
pub struct RecordingAdmin {
    calls: Mutex<Vec<AdminCall>>,
    fail: bool,
}

impl RecordingAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<AdminCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: AdminCall) -> TxnAdminResult<Value> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(TxnAdminError::transport("connection refused"))
        } else {
            Ok(json!({"ok": true}))
        }
    }
}

impl TransactionsAdmin for RecordingAdmin {
    fn coordinator_stats(&self) -> TxnAdminResult<Value> {
        self.record(AdminCall::CoordinatorStats)
    }

    fn coordinator_stats_by_id(&self, coordinator_id: u32) -> TxnAdminResult<Value> {
        self.record(AdminCall::CoordinatorStatsById(coordinator_id))
    }

    fn transaction_buffer_stats(
        &self,
        topic: &TopicName,
        low_water_marks: bool,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::TransactionBufferStats(
            topic.to_string(),
            low_water_marks,
        ))
    }

    fn pending_ack_stats(
        &self,
        topic: &TopicName,
        subscription: &str,
        low_water_marks: bool,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::PendingAckStats(
            topic.to_string(),
            subscription.to_string(),
            low_water_marks,
        ))
    }

    fn transaction_in_pending_ack_stats(
        &self,
        txn_id: TransactionId,
        topic: &TopicName,
        subscription: &str,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::TransactionInPendingAckStats(
            txn_id,
            topic.to_string(),
            subscription.to_string(),
        ))
    }

    fn transaction_in_buffer_stats(
        &self,
        txn_id: TransactionId,
        topic: &TopicName,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::TransactionInBufferStats(txn_id, topic.to_string()))
    }

    fn transaction_metadata(&self, txn_id: TransactionId) -> TxnAdminResult<Value> {
        self.record(AdminCall::TransactionMetadata(txn_id))
    }

    fn slow_transactions(&self, timeout: Duration) -> TxnAdminResult<Value> {
        self.record(AdminCall::SlowTransactions(timeout))
    }

    fn slow_transactions_by_coordinator(
        &self,
        coordinator_id: u32,
        timeout: Duration,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::SlowTransactionsByCoordinator(
            coordinator_id,
            timeout,
        ))
    }

    fn coordinator_internal_stats(
        &self,
        coordinator_id: u32,
        metadata: bool,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::CoordinatorInternalStats(coordinator_id, metadata))
    }

    fn pending_ack_internal_stats(
        &self,
        topic: &TopicName,
        subscription: &str,
        metadata: bool,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::PendingAckInternalStats(
            topic.to_string(),
            subscription.to_string(),
            metadata,
        ))
    }

    fn scale_transaction_coordinators(&self, replicas: u32) -> TxnAdminResult<()> {
        self.record(AdminCall::ScaleTransactionCoordinators(replicas))
            .map(|_| ())
    }

    fn position_stats_in_pending_ack(
        &self,
        topic: &TopicName,
        subscription: &str,
        position: Position,
    ) -> TxnAdminResult<Value> {
        self.record(AdminCall::PositionStatsInPendingAck(
            topic.to_string(),
            subscription.to_string(),
            position,
        ))
    }
}

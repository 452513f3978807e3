//! Blocking REST implementation of [`TransactionsAdmin`]
//!
//! Requests target the `/admin/v3/transactions` resource tree of the
//! admin service. One method call issues exactly one HTTP request; there
//! are no retries.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, Url};
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};
use crate::transactions::{Position, TopicName, TransactionId, TxnAdminError, TxnAdminResult};

use super::client::TransactionsAdmin;
use super::config::AdminConfig;

const BASE_SEGMENTS: [&str; 3] = ["admin", "v3", "transactions"];

/// HTTP transport for the transaction admin API.
#[derive(Debug, Clone)]
pub struct HttpTransactionsAdmin {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpTransactionsAdmin {
    pub fn new(config: &AdminConfig) -> TxnAdminResult<Self> {
        let base_url = Url::parse(config.web_service_url.trim()).map_err(|e| {
            TxnAdminError::transport(format!(
                "invalid admin url '{}': {}",
                config.web_service_url, e
            ))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TxnAdminError::transport(format!(
                "admin url '{}' cannot be used as a base",
                config.web_service_url
            )));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .danger_accept_invalid_certs(config.tls_allow_insecure_connection)
            .build()
            .map_err(|e| TxnAdminError::transport(format!("http client build failed: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    /// Absolute URL for `segments` below the transactions resource.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL accepts path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(BASE_SEGMENTS.iter())
                .extend(segments.iter());
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn send(&self, method: Method, url: Url, body: Option<Value>) -> TxnAdminResult<Value> {
        let target = url.to_string();
        log_event_with_fields(
            Event::AdminRequest,
            &[("method", method.as_str()), ("url", target.as_str())],
        );

        let mut builder = self.request(method, url);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().map_err(|e| {
            let err = TxnAdminError::transport(format!("request to {} failed: {}", target, e));
            log_event_with_fields(
                Event::AdminFailed,
                &[("error", err.to_string().as_str()), ("url", target.as_str())],
            );
            err
        })?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            TxnAdminError::transport(format!("reading response from {} failed: {}", target, e))
        })?;

        if !status.is_success() {
            let err = TxnAdminError::Server {
                status: status.as_u16(),
                message: server_reason(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string()),
            };
            log_event_with_fields(
                Event::AdminFailed,
                &[("error", err.to_string().as_str()), ("url", target.as_str())],
            );
            return Err(err);
        }

        log_event_with_fields(
            Event::AdminResponse,
            &[("status", status.as_str()), ("url", target.as_str())],
        );

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            TxnAdminError::transport(format!("response from {} is not JSON: {}", target, e))
        })
    }

    fn get(&self, segments: &[&str], query: &[(&str, String)]) -> TxnAdminResult<Value> {
        self.send(Method::GET, self.endpoint(segments, query), None)
    }
}

/// Failure text reported by the admin service, if any.
fn server_reason(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("reason")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| Some(body.to_string())),
        _ => Some(body.to_string()),
    }
}

fn topic_segments<'a>(topic: &'a TopicName, rest: &[&'a str]) -> Vec<&'a str> {
    let mut segments = topic.rest_segments().to_vec();
    segments.extend_from_slice(rest);
    segments
}

fn millis(duration: Duration) -> String {
    duration.as_millis().to_string()
}

fn coordinator_query(coordinator_id: u32) -> Vec<(&'static str, String)> {
    vec![("coordinatorId", coordinator_id.to_string())]
}

impl TransactionsAdmin for HttpTransactionsAdmin {
    fn coordinator_stats(&self) -> TxnAdminResult<Value> {
        self.get(&["coordinatorStats"], &[])
    }

    fn coordinator_stats_by_id(&self, coordinator_id: u32) -> TxnAdminResult<Value> {
        self.get(&["coordinatorStats"], &coordinator_query(coordinator_id))
    }

    fn transaction_buffer_stats(
        &self,
        topic: &TopicName,
        low_water_marks: bool,
    ) -> TxnAdminResult<Value> {
        let mut segments = vec!["transactionBufferStats"];
        segments.extend(topic_segments(topic, &[]));
        self.get(&segments, &[("lowWaterMarks", low_water_marks.to_string())])
    }

    fn pending_ack_stats(
        &self,
        topic: &TopicName,
        subscription: &str,
        low_water_marks: bool,
    ) -> TxnAdminResult<Value> {
        let mut segments = vec!["pendingAckStats"];
        segments.extend(topic_segments(topic, &[subscription]));
        self.get(&segments, &[("lowWaterMarks", low_water_marks.to_string())])
    }

    fn transaction_in_pending_ack_stats(
        &self,
        txn_id: TransactionId,
        topic: &TopicName,
        subscription: &str,
    ) -> TxnAdminResult<Value> {
        let most = txn_id.most_sig_bits().to_string();
        let least = txn_id.least_sig_bits().to_string();
        let mut segments = vec!["transactionInPendingAckStats"];
        segments.extend(topic_segments(topic, &[subscription, most.as_str(), least.as_str()]));
        self.get(&segments, &[])
    }

    fn transaction_in_buffer_stats(
        &self,
        txn_id: TransactionId,
        topic: &TopicName,
    ) -> TxnAdminResult<Value> {
        let most = txn_id.most_sig_bits().to_string();
        let least = txn_id.least_sig_bits().to_string();
        let mut segments = vec!["transactionInBufferStats"];
        segments.extend(topic_segments(topic, &[most.as_str(), least.as_str()]));
        self.get(&segments, &[])
    }

    fn transaction_metadata(&self, txn_id: TransactionId) -> TxnAdminResult<Value> {
        let most = txn_id.most_sig_bits().to_string();
        let least = txn_id.least_sig_bits().to_string();
        self.get(&["transactionMetadata", most.as_str(), least.as_str()], &[])
    }

    fn slow_transactions(&self, timeout: Duration) -> TxnAdminResult<Value> {
        let timeout = millis(timeout);
        self.get(&["slowTransactions", timeout.as_str()], &[])
    }

    fn slow_transactions_by_coordinator(
        &self,
        coordinator_id: u32,
        timeout: Duration,
    ) -> TxnAdminResult<Value> {
        let timeout = millis(timeout);
        self.get(
            &["slowTransactions", timeout.as_str()],
            &coordinator_query(coordinator_id),
        )
    }

    fn coordinator_internal_stats(
        &self,
        coordinator_id: u32,
        metadata: bool,
    ) -> TxnAdminResult<Value> {
        let id = coordinator_id.to_string();
        self.get(
            &["coordinatorInternalStats", id.as_str()],
            &[("metadata", metadata.to_string())],
        )
    }

    fn pending_ack_internal_stats(
        &self,
        topic: &TopicName,
        subscription: &str,
        metadata: bool,
    ) -> TxnAdminResult<Value> {
        let mut segments = vec!["pendingAckInternalStats"];
        segments.extend(topic_segments(topic, &[subscription]));
        self.get(&segments, &[("metadata", metadata.to_string())])
    }

    fn scale_transaction_coordinators(&self, replicas: u32) -> TxnAdminResult<()> {
        let url = self.endpoint(&["transactionCoordinator", "replicas"], &[]);
        self.send(Method::POST, url, Some(Value::from(replicas)))
            .map(|_| ())
    }

    fn position_stats_in_pending_ack(
        &self,
        topic: &TopicName,
        subscription: &str,
        position: Position,
    ) -> TxnAdminResult<Value> {
        let ledger = position.ledger_id().to_string();
        let entry = position.entry_id().to_string();
        let mut segments = vec!["pendingAckStats"];
        segments.extend(topic_segments(topic, &[subscription, ledger.as_str(), entry.as_str()]));
        let query: Vec<(&str, String)> = position
            .batch_index()
            .map(|batch| ("batchIndex", batch.to_string()))
            .into_iter()
            .collect();
        self.get(&segments, &query)
    }
}

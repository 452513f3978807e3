//! Parameter codec
//!
//! Converts raw flag text into typed values. Every failure is a
//! [`ValidationError`] naming the offending flag; nothing here performs a
//! remote call.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use super::commands::{CommandSpec, FlagValues};
use super::errors::{TxnAdminError, TxnAdminResult, ValidationError};
use super::relative_time::parse_relative_time;
use super::types::{CoordinatorSelector, Position, TopicName, TransactionId};

/// Typed view over the flags of one invocation.
pub struct ParameterCodec<'a> {
    spec: &'a CommandSpec,
    flags: &'a FlagValues,
}

impl<'a> ParameterCodec<'a> {
    pub fn new(spec: &'a CommandSpec, flags: &'a FlagValues) -> Self {
        Self { spec, flags }
    }

    fn display_name(&self, id: &str) -> String {
        self.spec
            .flag(id)
            .map(|f| f.display_name())
            .unwrap_or_else(|| format!("--{}", id))
    }

    /// Supplied value, falling back to the flag's declared default.
    fn raw(&self, id: &str) -> Option<&'a str> {
        self.flags
            .value(id)
            .or_else(|| self.spec.flag(id).and_then(|f| f.default))
    }

    fn required_raw(&self, id: &str) -> TxnAdminResult<&'a str> {
        self.raw(id)
            .ok_or_else(|| TxnAdminError::missing_flag(self.display_name(id)))
    }

    fn parse_number<T>(&self, id: &str, raw: &str) -> TxnAdminResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        raw.trim()
            .parse::<T>()
            .map_err(|e| TxnAdminError::invalid_value(self.display_name(id), raw, e.to_string()))
    }

    fn required_number<T>(&self, id: &str) -> TxnAdminResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.required_raw(id)?;
        self.parse_number(id, raw)
    }

    fn optional_number<T>(&self, id: &str) -> TxnAdminResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.raw(id).map(|raw| self.parse_number(id, raw)).transpose()
    }

    /// Whether a switch flag was given.
    pub fn switch(&self, id: &str) -> bool {
        self.flags.switch(id)
    }

    /// Required non-blank text.
    pub fn required_text(&self, id: &str) -> TxnAdminResult<String> {
        let raw = self.required_raw(id)?;
        if raw.trim().is_empty() {
            return Err(TxnAdminError::invalid_value(
                self.display_name(id),
                raw,
                "must not be blank",
            ));
        }
        Ok(raw.to_string())
    }

    /// Required topic, short or fully-qualified.
    pub fn topic(&self, id: &str) -> TxnAdminResult<TopicName> {
        let raw = self.required_raw(id)?;
        raw.parse()
            .map_err(|reason: String| TxnAdminError::invalid_value(self.display_name(id), raw, reason))
    }

    /// Both components are mandatory; there are no implicit defaults.
    pub fn transaction_id(&self, most_id: &str, least_id: &str) -> TxnAdminResult<TransactionId> {
        let most = self.required_number::<i32>(most_id)?;
        let least = self.required_number::<i64>(least_id)?;
        Ok(TransactionId::new(most, least))
    }

    /// Required non-negative coordinator id.
    pub fn coordinator_id(&self, id: &str) -> TxnAdminResult<u32> {
        self.required_number::<u32>(id)
    }

    /// Optional coordinator id; absence selects every coordinator.
    pub fn coordinator_selector(&self, id: &str) -> TxnAdminResult<CoordinatorSelector> {
        Ok(self.optional_number::<u32>(id)?.into())
    }

    /// Relative time such as `10s` or `5h`.
    ///
    /// The parser's message is surfaced verbatim.
    pub fn relative_time(&self, id: &str) -> TxnAdminResult<Duration> {
        let raw = self.required_raw(id)?;
        parse_relative_time(raw)
            .map_err(|e| ValidationError::Parameter(e.to_string()).into())
    }

    /// Coordinator pool size, at least one.
    pub fn replicas(&self, id: &str) -> TxnAdminResult<u32> {
        let raw = self.required_raw(id)?;
        let replicas: u32 = self.parse_number(id, raw)?;
        if replicas == 0 {
            return Err(TxnAdminError::invalid_value(
                self.display_name(id),
                raw,
                "must be at least 1",
            ));
        }
        Ok(replicas)
    }

    /// Ledger and entry are mandatory, the batch index optional and non-negative.
    pub fn position(&self, ledger_id: &str, entry_id: &str, batch_id: &str) -> TxnAdminResult<Position> {
        let ledger = self.required_number::<i64>(ledger_id)?;
        let entry = self.required_number::<i64>(entry_id)?;
        let batch = match self.optional_number::<i32>(batch_id)? {
            Some(index) => Some(u32::try_from(index).map_err(|_| {
                TxnAdminError::invalid_value(
                    self.display_name(batch_id),
                    index.to_string(),
                    "batch index must be non-negative",
                )
            })?),
            None => None,
        };
        Ok(Position::new(ledger, entry, batch))
    }
}

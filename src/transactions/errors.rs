//! Transaction admin error model
//!
//! Errors are explicit and terminal for the invocation that raised them.
//! Nothing here is retried.
//!
//! Error domains:
//! 1. Validation (operator input, detected before any remote call)
//! 2. Unknown command
//! 3. Transport (including failures reported by the admin service)

use std::fmt;

use thiserror::Error;

/// Result type for transaction admin operations
pub type TxnAdminResult<T> = Result<T, TxnAdminError>;

/// Malformed or missing operator input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required flag was not supplied
    #[error("missing required flag {0}")]
    MissingFlag(String),

    /// A flag value could not be converted
    #[error("invalid value '{value}' for {flag}: {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },

    /// A parameter failed its own parser; the parser's message is kept verbatim
    #[error("{0}")]
    Parameter(String),

    /// Argument syntax error (unknown flag, missing value, ...)
    #[error("{0}")]
    Usage(String),
}

/// Classification of a [`TxnAdminError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDomain {
    Validation,
    UnknownCommand,
    Transport,
}

impl ErrorDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorDomain::Validation => "VALIDATION_ERROR",
            ErrorDomain::UnknownCommand => "UNKNOWN_COMMAND",
            ErrorDomain::Transport => "TRANSPORT_ERROR",
        }
    }
}

impl fmt::Display for ErrorDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction admin errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxnAdminError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The admin service could not be reached or the exchange broke off
    #[error("transport error: {0}")]
    Transport(String),

    /// The admin service answered with a failure status
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl TxnAdminError {
    pub fn missing_flag(flag: impl Into<String>) -> Self {
        Self::Validation(ValidationError::MissingFlag(flag.into()))
    }

    pub fn invalid_value(
        flag: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation(ValidationError::InvalidValue {
            flag: flag.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn domain(&self) -> ErrorDomain {
        match self {
            TxnAdminError::Validation(_) => ErrorDomain::Validation,
            TxnAdminError::UnknownCommand(_) => ErrorDomain::UnknownCommand,
            TxnAdminError::Transport(_) | TxnAdminError::Server { .. } => ErrorDomain::Transport,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            TxnAdminError::Validation(_) => "TXN_VALIDATION_ERROR",
            TxnAdminError::UnknownCommand(_) => "TXN_UNKNOWN_COMMAND",
            TxnAdminError::Transport(_) => "TXN_TRANSPORT_ERROR",
            TxnAdminError::Server { .. } => "TXN_SERVER_ERROR",
        }
    }

    /// True when the error was raised before any remote call was attempted.
    pub fn is_pre_call(&self) -> bool {
        !matches!(self.domain(), ErrorDomain::Transport)
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self.domain() {
            ErrorDomain::Validation | ErrorDomain::UnknownCommand => 2,
            ErrorDomain::Transport => 1,
        }
    }
}

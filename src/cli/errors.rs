//! CLI-specific error types
//!
//! All CLI errors are terminal for the invocation.

use std::fmt;
use std::io;

use crate::transactions::TxnAdminError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or override error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Command line could not be parsed
    UsageError,
    /// The command itself failed
    CommandFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "TXN_CLI_CONFIG_ERROR",
            Self::IoError => "TXN_CLI_IO_ERROR",
            Self::UsageError => "TXN_CLI_USAGE_ERROR",
            Self::CommandFailed => "TXN_CLI_COMMAND_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    command_error: Option<TxnAdminError>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            command_error: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Usage error
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::UsageError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string; command failures report the command's own code
    pub fn code_str(&self) -> &'static str {
        match &self.command_error {
            Some(err) => err.code(),
            None => self.code.code(),
        }
    }

    /// The command error this CLI error carries, if any
    pub fn command_error(&self) -> Option<&TxnAdminError> {
        self.command_error.as_ref()
    }

    /// Process exit code
    pub fn exit_code(&self) -> i32 {
        match (&self.code, &self.command_error) {
            (_, Some(err)) => err.exit_code(),
            (CliErrorCode::UsageError, None) => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.command_error
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<TxnAdminError> for CliError {
    fn from(e: TxnAdminError) -> Self {
        Self {
            code: CliErrorCode::CommandFailed,
            message: e.to_string(),
            command_error: Some(e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

//! Admin client configuration
//!
//! Loaded from an optional JSON file; every field has a default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

/// Admin service connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Base URL of the admin service (default: "http://localhost:8080")
    #[serde(default = "default_web_service_url")]
    pub web_service_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Connection timeout in milliseconds (default: 60s)
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds (default: 60s)
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    /// Accept any TLS certificate
    #[serde(default)]
    pub tls_allow_insecure_connection: bool,

    /// Minimum severity written to the log (default: WARN)
    #[serde(default = "default_log_level")]
    pub log_level: Severity,
}

fn default_web_service_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    60_000
}

fn default_read_timeout_ms() -> u64 {
    60_000
}

fn default_log_level() -> Severity {
    Severity::Warn
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            web_service_url: default_web_service_url(),
            auth_token: None,
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            tls_allow_insecure_connection: false,
            log_level: default_log_level(),
        }
    }
}

impl AdminConfig {
    /// Create a config pointing at `url` with default settings
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            web_service_url: url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;

        let config: AdminConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid config JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let url = self.web_service_url.trim();
        if url.is_empty() {
            return Err("web_service_url must not be empty".to_string());
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!(
                "web_service_url must start with http:// or https://, got '{}'",
                url
            ));
        }
        if self.connect_timeout_ms == 0 {
            return Err("connect_timeout_ms must be > 0".to_string());
        }
        if self.read_timeout_ms == 0 {
            return Err("read_timeout_ms must be > 0".to_string());
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.web_service_url, "http://localhost:8080");
        assert_eq!(config.connect_timeout(), Duration::from_secs(60));
        assert_eq!(config.log_level, Severity::Warn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"web_service_url": "https://admin.internal:8443", "log_level": "INFO"}}"#
        )
        .unwrap();

        let config = AdminConfig::load(file.path()).unwrap();
        assert_eq!(config.web_service_url, "https://admin.internal:8443");
        assert_eq!(config.log_level, Severity::Info);
        assert_eq!(config.read_timeout_ms, 60_000);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"web_service_url": "admin:8080"}}"#).unwrap();
        let err = AdminConfig::load(file.path()).unwrap_err();
        assert!(err.contains("http://"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        assert!(AdminConfig::load(file.path())
            .unwrap_err()
            .starts_with("Invalid config JSON"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AdminConfig {
            connect_timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}

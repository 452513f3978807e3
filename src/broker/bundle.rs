//! Namespace bundle identifiers
//!
//! A bundle is a hash range of a namespace's topic space, written as
//! `tenant/namespace/0xLOWER_0xUPPER`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleParseError {
    #[error("invalid namespace '{0}' (expected tenant/namespace)")]
    InvalidNamespace(String),

    #[error("invalid bundle range '{0}' (expected 0xLOWER_0xUPPER)")]
    InvalidRange(String),

    #[error("empty bundle range: lower {lower:#010x} is not below upper {upper:#010x}")]
    EmptyRange { lower: u32, upper: u32 },
}

/// A namespace bundle: namespace plus hash range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceBundle {
    namespace: String,
    lower: u32,
    upper: u32,
}

impl NamespaceBundle {
    pub fn new(namespace: impl Into<String>, lower: u32, upper: u32) -> Result<Self, BundleParseError> {
        let namespace = namespace.into();
        if !is_valid_namespace(&namespace) {
            return Err(BundleParseError::InvalidNamespace(namespace));
        }
        if lower >= upper {
            return Err(BundleParseError::EmptyRange { lower, upper });
        }
        Ok(Self {
            namespace,
            lower,
            upper,
        })
    }

    /// The bundle spanning the whole hash space of `namespace`.
    pub fn full(namespace: impl Into<String>) -> Result<Self, BundleParseError> {
        Self::new(namespace, 0, u32::MAX)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }

    /// Range part of the identifier, e.g. `0x00000000_0xffffffff`
    pub fn range(&self) -> String {
        format!("{:#010x}_{:#010x}", self.lower, self.upper)
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    match namespace.split_once('/') {
        Some((tenant, ns)) => !tenant.is_empty() && !ns.is_empty() && !ns.contains('/'),
        None => false,
    }
}

fn parse_bound(text: &str) -> Option<u32> {
    let hex = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?;
    if hex.is_empty() {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

impl FromStr for NamespaceBundle {
    type Err = BundleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, range) = s
            .rsplit_once('/')
            .ok_or_else(|| BundleParseError::InvalidRange(s.to_string()))?;
        let (lower, upper) = range
            .split_once('_')
            .and_then(|(lower, upper)| Some((parse_bound(lower)?, parse_bound(upper)?)))
            .ok_or_else(|| BundleParseError::InvalidRange(range.to_string()))?;
        Self::new(namespace, lower, upper)
    }
}

impl fmt::Display for NamespaceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.range())
    }
}

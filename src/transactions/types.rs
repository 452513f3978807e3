//! Typed values carried by transaction admin commands
//!
//! Every value here is fully constructed or not constructed at all:
//! there are no partially-populated identifiers.

use std::fmt;
use std::str::FromStr;

/// Transaction identifier.
///
/// The most-significant component names the owning coordinator, the
/// least-significant component is the sequence number assigned by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    most_sig_bits: i32,
    least_sig_bits: i64,
}

impl TransactionId {
    /// Both components are required.
    pub const fn new(most_sig_bits: i32, least_sig_bits: i64) -> Self {
        Self {
            most_sig_bits,
            least_sig_bits,
        }
    }

    pub fn most_sig_bits(&self) -> i32 {
        self.most_sig_bits
    }

    pub fn least_sig_bits(&self) -> i64 {
        self.least_sig_bits
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.most_sig_bits, self.least_sig_bits)
    }
}

/// Location of a message: ledger, entry and optional batch index.
///
/// An absent batch index addresses the whole entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    ledger_id: i64,
    entry_id: i64,
    batch_index: Option<u32>,
}

impl Position {
    pub const fn new(ledger_id: i64, entry_id: i64, batch_index: Option<u32>) -> Self {
        Self {
            ledger_id,
            entry_id,
            batch_index,
        }
    }

    pub fn ledger_id(&self) -> i64 {
        self.ledger_id
    }

    pub fn entry_id(&self) -> i64 {
        self.entry_id
    }

    pub fn batch_index(&self) -> Option<u32> {
        self.batch_index
    }

    /// True when the position refers to the entry as a whole.
    pub fn is_whole_entry(&self) -> bool {
        self.batch_index.is_none()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.batch_index {
            Some(batch) => write!(f, "{}:{}:{}", self.ledger_id, self.entry_id, batch),
            None => write!(f, "{}:{}", self.ledger_id, self.entry_id),
        }
    }
}

/// Which coordinators an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinatorSelector {
    /// Every coordinator. Distinct from coordinator `0`.
    #[default]
    All,
    /// A single coordinator.
    Single(u32),
}

impl CoordinatorSelector {
    pub fn coordinator_id(&self) -> Option<u32> {
        match self {
            CoordinatorSelector::All => None,
            CoordinatorSelector::Single(id) => Some(*id),
        }
    }
}

impl From<Option<u32>> for CoordinatorSelector {
    fn from(id: Option<u32>) -> Self {
        id.map_or(CoordinatorSelector::All, CoordinatorSelector::Single)
    }
}

/// Persistence domain of a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopicDomain {
    Persistent,
    NonPersistent,
}

impl TopicDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicDomain::Persistent => "persistent",
            TopicDomain::NonPersistent => "non-persistent",
        }
    }
}

/// Fully-qualified topic name.
///
/// Short names expand into the `public/default` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicName {
    domain: TopicDomain,
    tenant: String,
    namespace: String,
    local_name: String,
}

pub const DEFAULT_TENANT: &str = "public";
pub const DEFAULT_NAMESPACE: &str = "default";

impl TopicName {
    pub fn domain(&self) -> TopicDomain {
        self.domain
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Path segments used by the REST boundary, in order.
    pub fn rest_segments(&self) -> [&str; 4] {
        [
            self.domain.as_str(),
            &self.tenant,
            &self.namespace,
            &self.local_name,
        ]
    }
}

impl FromStr for TopicName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("topic name must not be empty".to_string());
        }

        let (domain, rest) = match s.split_once("://") {
            Some(("persistent", rest)) => (TopicDomain::Persistent, rest),
            Some(("non-persistent", rest)) => (TopicDomain::NonPersistent, rest),
            Some((other, _)) => return Err(format!("unknown topic domain '{}'", other)),
            None if !s.contains('/') => {
                return Ok(Self {
                    domain: TopicDomain::Persistent,
                    tenant: DEFAULT_TENANT.to_string(),
                    namespace: DEFAULT_NAMESPACE.to_string(),
                    local_name: s.to_string(),
                })
            }
            None => (TopicDomain::Persistent, s),
        };

        // The local name may itself contain '/', tenant and namespace may not.
        let mut parts = rest.splitn(3, '/');
        let tenant = parts.next().unwrap_or_default();
        let namespace = parts.next().unwrap_or_default();
        let local_name = parts.next().unwrap_or_default();
        if tenant.is_empty() || namespace.is_empty() || local_name.is_empty() {
            return Err(format!(
                "expected <domain>://<tenant>/<namespace>/<topic>, got '{}'",
                s
            ));
        }

        Ok(Self {
            domain,
            tenant: tenant.to_string(),
            namespace: namespace.to_string(),
            local_name: local_name.to_string(),
        })
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}://{}/{}/{}",
            self.domain.as_str(),
            self.tenant,
            self.namespace,
            self.local_name
        )
    }
}

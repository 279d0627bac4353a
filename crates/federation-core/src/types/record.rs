use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `_2ndlock._tcp` SRV answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SrvTarget {
    /// Target host, without the trailing root dot
    pub name: String,

    /// Target port
    pub port: u16,

    /// SRV priority (lower is preferred)
    pub priority: u16,

    /// SRV weight among equal priorities
    pub weight: u16,
}

impl SrvTarget {
    /// Create a new SRV target
    #[must_use]
    pub fn new(name: impl Into<String>, port: u16, priority: u16, weight: u16) -> Self {
        Self {
            name: name.into(),
            port,
            priority,
            weight,
        }
    }

    /// `host:port` authority used to address the peer
    #[must_use]
    pub fn authority(&self) -> String {
        format!("{}:{}", self.name, self.port)
    }
}

impl fmt::Display for SrvTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} (priority {}, weight {})",
            self.name, self.port, self.priority, self.weight
        )
    }
}

/// A discovered, cacheable federation peer for a domain.
///
/// Serialized in the persisted cache shape:
/// `{ domain, created, publickey, srv: [{name, port, priority, weight}] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederationRecord {
    /// Domain advertised by the registry
    pub domain: String,

    /// Creation time as epoch milliseconds, string encoded
    pub created: String,

    /// Peer public key used to encrypt the handshake
    #[serde(rename = "publickey", default)]
    pub public_key: String,

    /// SRV targets in resolver order
    #[serde(default)]
    pub srv: Vec<SrvTarget>,
}

impl FederationRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn new(domain: impl Into<String>, public_key: impl Into<String>, srv: Vec<SrvTarget>) -> Self {
        Self {
            domain: domain.into(),
            created: Utc::now().timestamp_millis().to_string(),
            public_key: public_key.into(),
            srv,
        }
    }

    /// Returns true if the record carries a public key
    #[must_use]
    pub fn has_public_key(&self) -> bool {
        !self.public_key.is_empty()
    }

    /// Returns true if the record can be handed to the handshake client
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.has_public_key() && !self.srv.is_empty()
    }

    /// The target the handshake is sent to
    #[must_use]
    pub fn primary_target(&self) -> Option<&SrvTarget> {
        self.srv.first()
    }

    /// Creation time in epoch milliseconds, if `created` is numeric
    #[must_use]
    pub fn created_millis(&self) -> Option<i64> {
        self.created.parse().ok()
    }
}

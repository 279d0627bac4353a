use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registry answer to `GET /api/v1/publickey`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicKeyResponse {
    /// The registry public key
    pub publickey: String,
}

/// One candidate advertised by the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Advertised federation domain
    pub domain: String,

    /// Public key of the advertised domain
    #[serde(rename = "publicKey", default)]
    pub public_key: String,
}

/// A group of registry entries, keyed or listed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistryGroup {
    /// Entries keyed by an opaque identifier, kept in document order
    Keyed(Map<String, Value>),

    /// Entries as a plain list
    Listed(Vec<Value>),
}

impl RegistryGroup {
    /// Raw entry values in traversal order
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Self::Keyed(map) => Box::new(map.values()),
            Self::Listed(list) => Box::new(list.iter()),
        }
    }

    /// Number of raw entries in this group
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Keyed(map) => map.len(),
            Self::Listed(list) => list.len(),
        }
    }

    /// Returns true if the group has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registry answer to `POST /api/v1/federation`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRegistryResponse(pub Vec<RegistryGroup>);

impl RawRegistryResponse {
    /// Walk every entry of every group in order.
    ///
    /// Malformed entries are yielded as `Err` with the offending value so the
    /// caller decides whether to skip or abort.
    pub fn entries(&self) -> impl Iterator<Item = Result<RegistryEntry, &Value>> + '_ {
        self.0
            .iter()
            .flat_map(RegistryGroup::values)
            .map(|value| RegistryEntry::deserialize(value).map_err(|_| value))
    }

    /// Number of raw entries across all groups
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.0.iter().map(RegistryGroup::len).sum()
    }
}

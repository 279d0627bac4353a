use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EncryptedEnvelope;

/// Plaintext body of the peer user-key handshake
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserKeyRequest {
    /// Recipient address
    pub encrypted_email: String,

    /// Requesting domain
    pub encrypted_domain: String,
}

impl UserKeyRequest {
    /// Build the plaintext request for a recipient
    #[must_use]
    pub fn new(email: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            encrypted_email: email.into(),
            encrypted_domain: domain.into(),
        }
    }
}

/// Sealed handshake body: the two ciphertext fields, forwarded as produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedUserKeyRequest {
    /// Encrypted recipient address
    pub encrypted_email: Value,

    /// Encrypted requesting domain
    pub encrypted_domain: Value,
}

impl SealedUserKeyRequest {
    /// Take the ciphertext fields out of an encrypted body; absent ones are `null`
    #[must_use]
    pub fn from_envelope(envelope: &EncryptedEnvelope) -> Self {
        let field = |name: &str| envelope.body.get(name).cloned().unwrap_or(Value::Null);
        Self {
            encrypted_email: field("encryptedEmail"),
            encrypted_domain: field("encryptedDomain"),
        }
    }
}

/// Peer answer to the handshake, passed through verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeerKeyResponse(pub Value);

impl PeerKeyResponse {
    /// Borrow the raw JSON body
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw JSON body
    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl From<Value> for PeerKeyResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

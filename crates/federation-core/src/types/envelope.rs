use serde::Serialize;
use serde_json::Value;

use crate::{FederationError, PayloadEncryptor, Result};

/// Encrypted JSON body plus its checksum, forwarded without inspection
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptedEnvelope {
    /// Ciphertext body as produced by the encryptor
    pub body: Value,

    /// Checksum over `body`
    pub checksum: String,
}

impl EncryptedEnvelope {
    /// Serialize `payload`, encrypt it for `public_key` and checksum the result
    pub async fn seal<T: Serialize + Sync>(
        encryptor: &dyn PayloadEncryptor,
        public_key: &str,
        payload: &T,
    ) -> Result<Self> {
        let plain = serde_json::to_value(payload)
            .map_err(|e| FederationError::Capability(format!("unserializable payload: {e}")))?;
        let body = encryptor.encrypt_body(public_key, plain).await?;
        let checksum = encryptor.checksum(&body);
        Ok(Self { body, checksum })
    }
}

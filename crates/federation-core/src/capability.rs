//! Collaborator capabilities injected into the discovery engine.
//!
//! The engine never implements encryption, licensing, configuration or
//! storage itself; it consumes them through these traits.

use async_trait::async_trait;
use serde_json::Value;

use crate::{FederationRecord, Result};

/// Asymmetric payload encryption and checksum primitives
#[async_trait]
pub trait PayloadEncryptor: Send + Sync {
    /// Encrypt a JSON body for the holder of `public_key`
    async fn encrypt_body(&self, public_key: &str, body: Value) -> Result<Value>;

    /// Integrity checksum over an (encrypted) JSON body
    fn checksum(&self, body: &Value) -> String;
}

/// Source of this installation's license checksum (`X-Auth-Key`)
#[async_trait]
pub trait LicenseProvider: Send + Sync {
    /// Fetch the license checksum
    async fn license_checksum(&self) -> Result<String>;
}

/// Source of the public registry host (`federation.publicFederationService`)
#[async_trait]
pub trait RegistryHostSource: Send + Sync {
    /// Fetch the registry host, as `host` or `host:port`
    async fn registry_host(&self) -> Result<String>;
}

/// Per-domain store of discovered federation records.
///
/// Implementations must provide read-your-writes consistency within a
/// process and tolerate duplicate writes for the same domain.
#[async_trait]
pub trait FederationCache: Send + Sync {
    /// Stored records for `domain`, empty when never discovered
    async fn get(&self, domain: &str) -> Result<Vec<FederationRecord>>;

    /// Append one record under `domain`
    async fn set(&self, domain: &str, record: FederationRecord) -> Result<()>;
}

/// Inbound side of federation: requests arriving from other domains
#[async_trait]
pub trait InboundValidator: Send + Sync {
    /// Verify that `checksum` matches `body`, failing otherwise
    async fn validate_incoming_federation_request(&self, checksum: &str, body: &Value)
        -> Result<()>;

    /// This service's own key material for `email`, requested by `domain`
    async fn get_user_information(&self, email: &str, domain: &str) -> Result<Value>;
}

#[async_trait]
impl LicenseProvider for String {
    async fn license_checksum(&self) -> Result<String> {
        Ok(self.clone())
    }
}

#[async_trait]
impl RegistryHostSource for String {
    async fn registry_host(&self) -> Result<String> {
        Ok(self.clone())
    }
}

//! Public registry endpoints.

use crate::client::{endpoint, FederationClient};
use crate::error::TransportError;
use federation_core::{
    DiscoveryKind, EncryptedEnvelope, LicenseProvider, PayloadEncryptor, PublicKeyResponse,
    RawRegistryResponse, RegistryHostSource, Result,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error};

/// Registry public key endpoint
pub const PUBLIC_KEY_PATH: &str = "/api/v1/publickey";

/// Registry domain lookup endpoint
pub const FEDERATION_PATH: &str = "/api/v1/federation";

/// License checksum header
pub const AUTH_KEY_HEADER: &str = "X-Auth-Key";

/// Encrypted body checksum header for registry calls
pub const AUTH_CHECKSUM_HEADER: &str = "X-Auth-Checksum";

#[derive(Serialize)]
struct DomainLookup<'a> {
    domain: &'a str,
}

/// Client for the public federation registry.
///
/// The license checksum and registry host are fetched once per client and
/// reused; the registry public key is fetched on every lookup.
pub struct RegistryClient {
    client: FederationClient,
    encryptor: Arc<dyn PayloadEncryptor>,
    license: Arc<dyn LicenseProvider>,
    host_source: Arc<dyn RegistryHostSource>,
    license_checksum: OnceCell<String>,
    host: OnceCell<String>,
}

impl RegistryClient {
    /// Create a registry client from its collaborators
    #[must_use]
    pub fn new(
        client: FederationClient,
        encryptor: Arc<dyn PayloadEncryptor>,
        license: Arc<dyn LicenseProvider>,
        host_source: Arc<dyn RegistryHostSource>,
    ) -> Self {
        Self {
            client,
            encryptor,
            license,
            host_source,
            license_checksum: OnceCell::new(),
            host: OnceCell::new(),
        }
    }

    /// Fetch the registry public key.
    ///
    /// Fails with [`DiscoveryKind::RegistryKeyUnavailable`]; the cause is logged.
    pub async fn fetch_registry_public_key(&self) -> Result<String> {
        self.load_public_key().await.map_err(|e| {
            error!(error = %e, "can't load public key from public federation service");
            DiscoveryKind::RegistryKeyUnavailable.into()
        })
    }

    /// Ask the registry who hosts federation for `domain`.
    ///
    /// The registry public key is fetched first. Any failure, including the
    /// key fetch, is [`DiscoveryKind::RegistryLookupFailed`].
    pub async fn fetch_domain_info(&self, domain: &str) -> Result<RawRegistryResponse> {
        self.load_domain_info(domain).await.map_err(|e| {
            error!(domain, error = %e, "can't load domain information from public federation service");
            DiscoveryKind::RegistryLookupFailed.into()
        })
    }

    async fn load_domain_info(
        &self,
        domain: &str,
    ) -> std::result::Result<RawRegistryResponse, TransportError> {
        let public_key = self.fetch_registry_public_key().await?;
        self.lookup_domain(&public_key, domain).await
    }

    async fn load_public_key(&self) -> std::result::Result<String, TransportError> {
        let checksum = self.load_license_checksum().await?;
        let host = self.load_host().await?;
        let url = endpoint(self.client.config().registry_scheme, host, PUBLIC_KEY_PATH)?;

        let response: PublicKeyResponse = self
            .client
            .get_json(&url, &[(AUTH_KEY_HEADER, checksum)])
            .await?;
        Ok(response.publickey)
    }

    async fn lookup_domain(
        &self,
        public_key: &str,
        domain: &str,
    ) -> std::result::Result<RawRegistryResponse, TransportError> {
        let checksum = self.load_license_checksum().await?;
        let host = self.load_host().await?;
        let envelope =
            EncryptedEnvelope::seal(self.encryptor.as_ref(), public_key, &DomainLookup { domain })
                .await?;
        let url = endpoint(self.client.config().registry_scheme, host, FEDERATION_PATH)?;

        let response: RawRegistryResponse = self
            .client
            .post_json(
                &url,
                &envelope.body,
                &[
                    (AUTH_KEY_HEADER, checksum),
                    (AUTH_CHECKSUM_HEADER, envelope.checksum.as_str()),
                ],
            )
            .await?;
        debug!(domain, entries = response.entry_count(), "registry answered lookup");
        Ok(response)
    }

    async fn load_license_checksum(&self) -> std::result::Result<&str, TransportError> {
        let checksum = self
            .license_checksum
            .get_or_try_init(|| self.license.license_checksum())
            .await?;
        Ok(checksum)
    }

    async fn load_host(&self) -> std::result::Result<&str, TransportError> {
        let host = self
            .host
            .get_or_try_init(|| self.host_source.registry_host())
            .await?;
        Ok(host)
    }
}

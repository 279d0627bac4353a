//! Discovery orchestration: email to domain to cached records to handshake.

use crate::parser::ResponseParser;
use crate::settings::FederationSettings;
use federation_client::{FederationClient, PeerClient, RegistryClient};
use federation_core::{
    FederationCache, FederationError, FederationRecord, LicenseProvider, PayloadEncryptor,
    PeerKeyResponse, RegistryHostSource, Result, ValidationKind,
};
use federation_dns::{HickorySrvResolver, SrvResolver};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Domain part of a federated address (the segment after the first `@`)
pub fn email_domain(email: &str) -> Result<&str> {
    match email.split('@').nth(1).map(str::trim) {
        Some(domain) if !domain.is_empty() => Ok(domain),
        _ => Err(ValidationKind::InvalidEmail.into()),
    }
}

/// Check that a record can be handed to the handshake client
pub fn ensure_usable(record: &FederationRecord) -> Result<()> {
    if !record.has_public_key() {
        return Err(ValidationKind::MissingPublicKey.into());
    }
    if record.srv.is_empty() {
        return Err(ValidationKind::MissingSrv.into());
    }
    Ok(())
}

/// The discovery engine.
///
/// Discovery is cache-or-fetch: a domain with stored records never touches
/// the registry again. Concurrent misses for one domain may both fetch and
/// both write; the cache tolerates the duplicates.
pub struct FederationService {
    registry: RegistryClient,
    parser: ResponseParser,
    peer: PeerClient,
    cache: Arc<dyn FederationCache>,
}

impl FederationService {
    /// Assemble the engine from its parts
    #[must_use]
    pub fn new(
        registry: RegistryClient,
        parser: ResponseParser,
        peer: PeerClient,
        cache: Arc<dyn FederationCache>,
    ) -> Self {
        Self {
            registry,
            parser,
            peer,
            cache,
        }
    }

    /// Create a builder wiring the engine from settings and capabilities
    #[must_use]
    pub fn builder(settings: FederationSettings) -> FederationServiceBuilder {
        FederationServiceBuilder::new(settings)
    }

    /// Load the public keys of a remote user.
    ///
    /// Only the first discovered record is tried: it is validated and its
    /// first SRV target receives the handshake, whose answer is returned.
    pub async fn resolve_remote_user_keys(&self, email: &str) -> Result<PeerKeyResponse> {
        let domain = email_domain(email)?;
        info!(domain, "prepare federation");

        let records = self.discover_federation(domain).await?;
        let Some(record) = records.first() else {
            error!(domain, "no federation candidate discovered");
            return Err(ValidationKind::MissingSrv.into());
        };

        if let Err(e) = ensure_usable(record) {
            error!(domain, candidate = %record.domain, error = %e, "federation candidate unusable");
            return Err(e);
        }

        let target = &record.srv[0];
        self.peer
            .request_user_keys(&record.public_key, email, domain, target)
            .await
    }

    /// Records for `domain`, from the cache or fetched from the registry.
    ///
    /// A non-empty cache entry is returned verbatim. Otherwise the registry
    /// is asked, the answer parsed, and every record persisted before return.
    pub async fn discover_federation(&self, domain: &str) -> Result<Vec<FederationRecord>> {
        let stored = self.cache.get(domain).await.map_err(|e| log_cache(domain, e))?;
        if !stored.is_empty() {
            debug!(domain, records = stored.len(), "federation cache hit");
            return Ok(stored);
        }

        debug!(domain, "federation cache miss");
        let raw = self.registry.fetch_domain_info(domain).await?;
        let records = self.parser.parse(&raw).await;

        for record in &records {
            self.cache
                .set(domain, record.clone())
                .await
                .map_err(|e| log_cache(domain, e))?;
        }

        info!(domain, records = records.len(), "federation discovered");
        Ok(records)
    }
}

fn log_cache(domain: &str, err: FederationError) -> FederationError {
    error!(domain, error = %err, "federation cache unavailable");
    err
}

/// Composition root for [`FederationService`]
pub struct FederationServiceBuilder {
    settings: FederationSettings,
    encryptor: Option<Arc<dyn PayloadEncryptor>>,
    license: Option<Arc<dyn LicenseProvider>>,
    cache: Option<Arc<dyn FederationCache>>,
    resolver: Option<Arc<dyn SrvResolver>>,
    host_source: Option<Arc<dyn RegistryHostSource>>,
    client: Option<FederationClient>,
}

impl FederationServiceBuilder {
    /// Start from loaded settings
    #[must_use]
    pub fn new(settings: FederationSettings) -> Self {
        Self {
            settings,
            encryptor: None,
            license: None,
            cache: None,
            resolver: None,
            host_source: None,
            client: None,
        }
    }

    /// Encryption and checksum capability (required)
    #[must_use]
    pub fn encryptor(mut self, encryptor: Arc<dyn PayloadEncryptor>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    /// License checksum capability (required)
    #[must_use]
    pub fn license(mut self, license: Arc<dyn LicenseProvider>) -> Self {
        self.license = Some(license);
        self
    }

    /// Federation cache (required)
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn FederationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// SRV resolver; defaults to the system resolver
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn SrvResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Registry host source; defaults to the settings' static host
    #[must_use]
    pub fn host_source(mut self, host_source: Arc<dyn RegistryHostSource>) -> Self {
        self.host_source = Some(host_source);
        self
    }

    /// Prebuilt transport; defaults to one derived from the settings
    #[must_use]
    pub fn client(mut self, client: FederationClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<FederationService> {
        self.settings.validate()?;

        let encryptor = self.encryptor.ok_or_else(|| missing("encryptor"))?;
        let license = self.license.ok_or_else(|| missing("license provider"))?;
        let cache = self.cache.ok_or_else(|| missing("cache"))?;

        let resolver: Arc<dyn SrvResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => Arc::new(HickorySrvResolver::from_system_conf()?),
        };
        let client = match self.client {
            Some(client) => client,
            None => FederationClient::builder()
                .config(self.settings.transport())
                .build()?,
        };
        let host_source: Arc<dyn RegistryHostSource> = match self.host_source {
            Some(source) => source,
            None => Arc::new(self.settings.clone()),
        };

        Ok(FederationService::new(
            RegistryClient::new(client.clone(), encryptor.clone(), license, host_source),
            ResponseParser::new(resolver),
            PeerClient::new(client, encryptor),
            cache,
        ))
    }
}

fn missing(what: &str) -> FederationError {
    FederationError::Config(format!("federation service requires a {what}"))
}

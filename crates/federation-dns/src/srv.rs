//! `_2ndlock._tcp` SRV lookups.

use async_trait::async_trait;
use federation_core::SrvTarget;
use hickory_resolver::TokioResolver;
use tracing::debug;

use crate::error::{DnsError, DnsResult};

/// Service and protocol labels prepended to a federation domain
pub const SERVICE_LABEL: &str = "_2ndlock._tcp";

/// SRV query name for a federation domain
#[must_use]
pub fn service_name(domain: &str) -> String {
    format!("{SERVICE_LABEL}.{domain}")
}

/// Resolves the federation SRV record of a domain.
///
/// Any resolver failure (NXDOMAIN, SERVFAIL, timeout) is reported as `None`,
/// never as an error, so discovery keeps going for other candidates.
#[async_trait]
pub trait SrvResolver: Send + Sync {
    /// SRV targets for `domain` in resolver order, or `None` if it has none
    async fn resolve_service_record(&self, domain: &str) -> Option<Vec<SrvTarget>>;
}

/// SRV resolver backed by hickory and the platform resolver configuration
#[derive(Clone)]
pub struct HickorySrvResolver {
    resolver: TokioResolver,
}

impl HickorySrvResolver {
    /// Wrap an existing hickory resolver
    #[must_use]
    pub const fn new(resolver: TokioResolver) -> Self {
        Self { resolver }
    }

    /// Build a resolver from the system configuration (`/etc/resolv.conf`)
    pub fn from_system_conf() -> DnsResult<Self> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| DnsError::Setup(e.to_string()))?
            .build();
        Ok(Self::new(resolver))
    }
}

#[async_trait]
impl SrvResolver for HickorySrvResolver {
    async fn resolve_service_record(&self, domain: &str) -> Option<Vec<SrvTarget>> {
        let name = service_name(domain);
        debug!(name = %name, "querying federation SRV record");

        match self.resolver.srv_lookup(name.as_str()).await {
            Ok(lookup) => Some(
                lookup
                    .iter()
                    .map(|srv| {
                        SrvTarget::new(
                            strip_root(&srv.target().to_utf8()),
                            srv.port(),
                            srv.priority(),
                            srv.weight(),
                        )
                    })
                    .collect(),
            ),
            Err(e) => {
                debug!(name = %name, error = %e, "no federation SRV record");
                None
            }
        }
    }
}

/// Drop the trailing root label dot of a fully qualified name.
fn strip_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

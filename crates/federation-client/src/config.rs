//! Transport configuration for outbound federation calls.

use federation_core::Scheme;
use std::time::Duration;

/// Default per-call timeout (`fed_timeout`)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by the registry and peer clients
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Timeout applied to every outbound request
    pub timeout: Duration,

    /// Scheme used to reach the public registry
    pub registry_scheme: Scheme,

    /// Scheme used for the peer handshake (`fed_flag`)
    pub peer_scheme: Scheme,

    /// User-Agent header
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportConfig {
    /// Create a configuration with HTTPS everywhere and the default timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            registry_scheme: Scheme::Https,
            peer_scheme: Scheme::Https,
            user_agent: format!("federation-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the per-call timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-call timeout in milliseconds, as `fed_timeout` carries it
    #[must_use]
    pub const fn timeout_millis(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Set the registry scheme (useful for testing)
    #[must_use]
    pub const fn registry_scheme(mut self, scheme: Scheme) -> Self {
        self.registry_scheme = scheme;
        self
    }

    /// Set the peer handshake scheme
    #[must_use]
    pub const fn peer_scheme(mut self, scheme: Scheme) -> Self {
        self.peer_scheme = scheme;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

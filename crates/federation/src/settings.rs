//! Federation settings loaded once at startup.

use async_trait::async_trait;
use federation_client::TransportConfig;
use federation_core::{FederationError, RegistryHostSource, Result, Scheme};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings consumed by the discovery engine.
///
/// ```toml
/// fed_timeout = 10000
/// fed_flag = "https"
///
/// [federation]
/// publicFederationService = "federation.2ndlock.org"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederationSettings {
    /// Public registry location.
    #[serde(default)]
    pub federation: RegistrySettings,

    /// Timeout for every outbound call, in milliseconds.
    #[serde(rename = "fed_timeout", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Transport scheme for the peer handshake.
    #[serde(rename = "fed_flag", default)]
    pub peer_scheme: Scheme,
}

/// The `[federation]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySettings {
    /// Registry host, as `host` or `host:port`.
    #[serde(rename = "publicFederationService", default = "default_registry_host")]
    pub public_federation_service: String,
}

impl Default for FederationSettings {
    fn default() -> Self {
        Self {
            federation: RegistrySettings::default(),
            timeout_ms: default_timeout_ms(),
            peer_scheme: Scheme::Https,
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            public_federation_service: default_registry_host(),
        }
    }
}

impl FederationSettings {
    /// Load settings from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| FederationError::Config(format!("{}: {e}", path.display())))?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(content).map_err(|e| FederationError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.federation.public_federation_service.trim().is_empty() {
            return Err(FederationError::Config(
                "federation.publicFederationService must not be empty".into(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(FederationError::Config("fed_timeout must be positive".into()));
        }
        Ok(())
    }

    /// Transport configuration derived from these settings.
    #[must_use]
    pub fn transport(&self) -> TransportConfig {
        TransportConfig::new()
            .timeout_millis(self.timeout_ms)
            .peer_scheme(self.peer_scheme)
    }
}

#[async_trait]
impl RegistryHostSource for FederationSettings {
    async fn registry_host(&self) -> Result<String> {
        Ok(self.federation.public_federation_service.clone())
    }
}

// Default value functions for serde.
const fn default_timeout_ms() -> u64 {
    10_000
}

fn default_registry_host() -> String {
    String::from("federation.2ndlock.org")
}

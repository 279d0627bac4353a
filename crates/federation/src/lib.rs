//! Domain federation discovery and handshake engine for 2ndLock services.
//!
//! Turns an email address into a validated, cached, per-domain federation
//! record and a completed encrypted handshake with the peer hosting that
//! domain.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use federation::{FederationService, FederationSettings, MemoryCache};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> federation::Result<()> {
//!     let settings = FederationSettings::load("federation.toml".as_ref())?;
//!     let service = FederationService::builder(settings)
//!         .encryptor(Arc::new(MyEncryptor))
//!         .license(Arc::new(MyLicense))
//!         .cache(Arc::new(MemoryCache::new()))
//!         .build()?;
//!
//!     let keys = service.resolve_remote_user_keys("alice@example.com").await?;
//!     println!("{}", keys.as_value());
//!     Ok(())
//! }
//! ```
//!
//! # Flow
//!
//! 1. The domain part of the address is looked up in the [`FederationCache`].
//! 2. On a miss the public registry is asked who hosts federation for it
//!    ([`RegistryClient`]), and each advertised candidate is located through
//!    its `_2ndlock._tcp` SRV record ([`ResponseParser`]).
//! 3. The resulting records are cached and the first one is used for the
//!    encrypted user-key handshake ([`PeerClient`]).
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

mod cache;
mod gateway;
mod parser;
mod service;
mod settings;

pub use cache::{CacheDocument, JsonFileCache, MemoryCache};
pub use gateway::FederationGateway;
pub use parser::{srv_lookup_domain, ResponseParser, BOOTSTRAP_DOMAIN, ROOT_DOMAIN};
pub use service::{email_domain, ensure_usable, FederationService, FederationServiceBuilder};
pub use settings::{FederationSettings, RegistrySettings};

// Re-export core types
pub use federation_core::*;

// Re-export clients and resolver
pub use federation_client::{FederationClient, FederationClientBuilder, PeerClient, RegistryClient, TransportConfig};
pub use federation_dns::{service_name, HickorySrvResolver, SrvResolver};

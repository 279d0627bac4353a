//! Registry discovery and peer handshake clients for domain federation.
//!
//! [`RegistryClient`] asks the public registry who hosts federation for a
//! domain; [`PeerClient`] performs the encrypted user-key exchange with the
//! peer found that way. Both share one [`FederationClient`] transport.

mod client;
mod config;
mod error;
pub mod api;

#[cfg(test)]
mod test_support;

pub use api::{PeerClient, RegistryClient};
pub use client::{FederationClient, FederationClientBuilder};
pub use config::*;
pub use federation_core::{FederationError, Result};

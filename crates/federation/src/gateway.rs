//! Boundary façade: the four operations a request layer maps onto.

use crate::service::FederationService;
use federation_core::{FederationRecord, InboundValidator, PeerKeyResponse, Result};
use serde_json::Value;
use std::sync::Arc;

/// Outbound discovery plus inbound validation behind one handle
#[derive(Clone)]
pub struct FederationGateway {
    service: Arc<FederationService>,
    validator: Arc<dyn InboundValidator>,
}

impl FederationGateway {
    /// Pair the discovery engine with the inbound validator
    #[must_use]
    pub fn new(service: Arc<FederationService>, validator: Arc<dyn InboundValidator>) -> Self {
        Self { service, validator }
    }

    /// Public keys of a user hosted on another domain
    pub async fn load_remote_user_public_keys(&self, email: &str) -> Result<PeerKeyResponse> {
        self.service.resolve_remote_user_keys(email).await
    }

    /// Discover (or recall) the federation records of `domain`
    pub async fn init_federation(&self, domain: &str) -> Result<Vec<FederationRecord>> {
        self.service.discover_federation(domain).await
    }

    /// Verify an incoming federation request against its checksum
    pub async fn validate_incoming_federation_request(
        &self,
        checksum: &str,
        body: &Value,
    ) -> Result<()> {
        self.validator
            .validate_incoming_federation_request(checksum, body)
            .await
    }

    /// This service's key material for a user, requested by a peer
    pub async fn get_user_keys(&self, email: &str, domain: &str) -> Result<Value> {
        self.validator.get_user_information(email, domain).await
    }
}

//! Peer user-key handshake.

use crate::client::{endpoint, FederationClient};
use crate::error::TransportError;
use federation_core::{
    DiscoveryKind, EncryptedEnvelope, PayloadEncryptor, PeerKeyResponse, Result,
    SealedUserKeyRequest, SrvTarget, UserKeyRequest,
};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Peer user federation endpoint
pub const USER_PATH: &str = "/api/v1/federation/user";

/// Encrypted body checksum header for peer calls
pub const FEDERATION_CHECKSUM_HEADER: &str = "X-Federation-Checksum";

/// Client for the encrypted user-key exchange with a discovered peer
pub struct PeerClient {
    client: FederationClient,
    encryptor: Arc<dyn PayloadEncryptor>,
}

impl PeerClient {
    /// Create a peer client
    #[must_use]
    pub fn new(client: FederationClient, encryptor: Arc<dyn PayloadEncryptor>) -> Self {
        Self { client, encryptor }
    }

    /// Ask the peer at `target` for the public keys of `email`.
    ///
    /// The peer's answer is returned verbatim. Fails with
    /// [`DiscoveryKind::PeerHandshakeFailed`]; the cause is logged.
    pub async fn request_user_keys(
        &self,
        peer_public_key: &str,
        email: &str,
        domain: &str,
        target: &SrvTarget,
    ) -> Result<PeerKeyResponse> {
        let authority = target.authority();
        info!(domain, target = %authority, "starting federation handshake");

        self.handshake(peer_public_key, email, domain, &authority)
            .await
            .map_err(|e| {
                error!(domain, target = %authority, error = %e, "federation request to target service failed");
                DiscoveryKind::PeerHandshakeFailed.into()
            })
    }

    async fn handshake(
        &self,
        peer_public_key: &str,
        email: &str,
        domain: &str,
        authority: &str,
    ) -> std::result::Result<PeerKeyResponse, TransportError> {
        let envelope = EncryptedEnvelope::seal(
            self.encryptor.as_ref(),
            peer_public_key,
            &UserKeyRequest::new(email, domain),
        )
        .await?;
        let sealed = SealedUserKeyRequest::from_envelope(&envelope);
        let url = endpoint(self.client.config().peer_scheme, authority, USER_PATH)?;

        let response: PeerKeyResponse = self
            .client
            .post_json(
                &url,
                &sealed,
                &[(FEDERATION_CHECKSUM_HEADER, envelope.checksum.as_str())],
            )
            .await?;
        debug!(target = %authority, "peer answered handshake");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{http, ByteEncryptor, TagEncryptor};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn target_of(server: &MockServer) -> SrvTarget {
        let addr = server.address();
        SrvTarget::new(addr.ip().to_string(), addr.port(), 10, 5)
    }

    fn peer(timeout: Duration) -> PeerClient {
        PeerClient::new(http(timeout), Arc::new(TagEncryptor))
    }

    #[tokio::test]
    async fn sends_sealed_fields_and_returns_body_verbatim() {
        let server = MockServer::start().await;
        let sealed = TagEncryptor::seal_value(
            "PKX",
            json!({"encryptedEmail": "alice@example.com", "encryptedDomain": "example.com"}),
        );
        let checksum = TagEncryptor::checksum_of(&sealed);
        let answer = json!({"keys": [{"email": "alice@example.com", "publicKey": "ALICE"}]});

        Mock::given(method("POST"))
            .and(path(USER_PATH))
            .and(header("X-Federation-Checksum", checksum.as_str()))
            .and(header("Content-Type", "application/json"))
            .and(body_json(&sealed))
            .respond_with(ResponseTemplate::new(200).set_body_json(&answer))
            .expect(1)
            .mount(&server)
            .await;

        let response = peer(Duration::from_secs(5))
            .request_user_keys("PKX", "alice@example.com", "example.com", &target_of(&server))
            .await
            .unwrap();
        assert_eq!(response.into_inner(), answer);
    }

    #[tokio::test]
    async fn forwards_non_string_ciphertext() {
        let server = MockServer::start().await;
        let sealed = ByteEncryptor::seal_value(json!({
            "encryptedEmail": "a@example.com",
            "encryptedDomain": "example.com",
        }));
        assert!(sealed["encryptedEmail"].is_array());
        let checksum = TagEncryptor::checksum_of(&sealed);

        Mock::given(method("POST"))
            .and(path(USER_PATH))
            .and(header("X-Federation-Checksum", checksum.as_str()))
            .and(body_json(&sealed))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"keys": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = PeerClient::new(http(Duration::from_secs(5)), Arc::new(ByteEncryptor));
        let response = client
            .request_user_keys("PKX", "a@example.com", "example.com", &target_of(&server))
            .await
            .unwrap();
        assert_eq!(response.into_inner(), json!({"keys": []}));
    }

    #[tokio::test]
    async fn peer_error_is_handshake_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(USER_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "unknown user"})))
            .mount(&server)
            .await;

        let err = peer(Duration::from_secs(5))
            .request_user_keys("PKX", "bob@example.com", "example.com", &target_of(&server))
            .await
            .unwrap_err();
        assert_eq!(err.discovery_kind(), Some(DiscoveryKind::PeerHandshakeFailed));
        assert_eq!(err.status_code(), Some(400));
    }

    #[tokio::test]
    async fn slow_peer_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(USER_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = peer(Duration::from_millis(100))
            .request_user_keys("PKX", "alice@example.com", "example.com", &target_of(&server))
            .await
            .unwrap_err();
        assert_eq!(err.discovery_kind(), Some(DiscoveryKind::PeerHandshakeFailed));
    }

    #[tokio::test]
    async fn unreachable_peer_is_handshake_failed() {
        let target = SrvTarget::new("127.0.0.1", 1, 0, 0);
        let err = peer(Duration::from_millis(500))
            .request_user_keys("PKX", "alice@example.com", "example.com", &target)
            .await
            .unwrap_err();
        assert_eq!(err.discovery_kind(), Some(DiscoveryKind::PeerHandshakeFailed));
    }
}

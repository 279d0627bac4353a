//! Shared HTTP transport for registry and peer calls.

use crate::config::TransportConfig;
use crate::error::TransportError;
use federation_core::{FederationError, Result, Scheme};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Longest error body kept for logging
const MAX_ERROR_BODY: usize = 512;

/// HTTP transport used by the federation clients
#[derive(Clone)]
pub struct FederationClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    config: TransportConfig,
}

impl FederationClient {
    /// Create a transport with default settings
    pub fn new() -> Result<Self> {
        FederationClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> FederationClientBuilder {
        FederationClientBuilder::new()
    }

    /// Active transport configuration
    #[must_use]
    pub fn config(&self) -> &TransportConfig {
        &self.inner.config
    }

    /// Per-call timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.inner.config.timeout
    }

    /// Perform a GET request expecting a JSON answer
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        headers: &[(&str, &str)],
    ) -> std::result::Result<T, TransportError> {
        debug!(url = %url, "GET request");

        let mut request = self
            .inner
            .http
            .get(url.clone())
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Perform a POST request with a JSON body, expecting a JSON answer
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &Url,
        body: &B,
        headers: &[(&str, &str)],
    ) -> std::result::Result<T, TransportError> {
        debug!(url = %url, "POST request");

        let mut request = self.inner.http.post(url.clone()).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Decode a JSON answer or turn a non-2xx status into an error
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> std::result::Result<T, TransportError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            let mut body = body;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            Err(TransportError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Build `<scheme>://<authority><path>`
pub(crate) fn endpoint(
    scheme: Scheme,
    authority: &str,
    path: &str,
) -> std::result::Result<Url, TransportError> {
    Ok(Url::parse(&format!("{scheme}://{authority}{path}"))?)
}

/// Builder for configuring a [`FederationClient`]
pub struct FederationClientBuilder {
    config: TransportConfig,
}

impl Default for FederationClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FederationClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: TransportConfig::default(),
        }
    }

    /// Replace the whole transport configuration
    #[must_use]
    pub fn config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the per-call timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the registry scheme (useful for testing)
    #[must_use]
    pub fn registry_scheme(mut self, scheme: Scheme) -> Self {
        self.config.registry_scheme = scheme;
        self
    }

    /// Set the peer handshake scheme
    #[must_use]
    pub fn peer_scheme(mut self, scheme: Scheme) -> Self {
        self.config.peer_scheme = scheme;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<FederationClient> {
        let http = HttpClient::builder()
            .timeout(self.config.timeout)
            .user_agent(&self.config.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| FederationError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(FederationClient {
            inner: Arc::new(ClientInner {
                http,
                config: self.config,
            }),
        })
    }
}

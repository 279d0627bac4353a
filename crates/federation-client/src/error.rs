use federation_core::FederationError;
use thiserror::Error;

/// Underlying cause of a failed outbound call.
///
/// Logged at the failure site and then collapsed into a
/// [`federation_core::DiscoveryKind`]; never shown to callers.
#[derive(Error, Debug)]
pub(crate) enum TransportError {
    /// Connection, TLS or timeout failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Body was not the expected JSON
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint URL could not be built
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// An injected capability failed
    #[error(transparent)]
    Capability(#[from] FederationError),
}

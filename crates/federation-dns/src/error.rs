use thiserror::Error;

/// Result type alias for resolver setup
pub type DnsResult<T> = std::result::Result<T, DnsError>;

/// Errors raised while building a resolver.
///
/// Lookups themselves never fail; see [`crate::SrvResolver`].
#[derive(Error, Debug)]
pub enum DnsError {
    /// The system resolver configuration could not be read
    #[error("failed to create resolver: {0}")]
    Setup(String),
}

impl From<DnsError> for federation_core::FederationError {
    fn from(err: DnsError) -> Self {
        match err {
            DnsError::Setup(msg) => Self::Config(msg),
        }
    }
}

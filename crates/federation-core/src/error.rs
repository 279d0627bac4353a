use thiserror::Error;

/// Result type alias for federation operations
pub type Result<T> = std::result::Result<T, FederationError>;

/// Why a discovered federation record (or an inbound request) was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// The address has no domain part after `@`
    InvalidEmail,

    /// The recipient service advertised no public key
    MissingPublicKey,

    /// The recipient domain has no `_2ndlock._tcp` SRV target
    MissingSrv,

    /// An inbound payload does not match its checksum
    ChecksumMismatch,
}

impl ValidationKind {
    /// Fixed, client-facing message for this kind
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidEmail => "federation not possible due invalid recipient address",
            Self::MissingPublicKey => {
                "federation not possible due missing public key from recipient service"
            }
            Self::MissingSrv => {
                "federation not possible due missing dns srv entry for 2ndLock in target domain"
            }
            Self::ChecksumMismatch => "federation request rejected due invalid checksum",
        }
    }
}

/// Which outbound step of discovery or handshake failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryKind {
    /// The registry public key could not be fetched
    RegistryKeyUnavailable,

    /// The registry domain lookup failed
    RegistryLookupFailed,

    /// The peer rejected or never answered the user-key handshake
    PeerHandshakeFailed,
}

impl DiscoveryKind {
    /// Fixed, client-facing message for this kind
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::RegistryKeyUnavailable => "can't load public key from public federation service",
            Self::RegistryLookupFailed => {
                "can't load domain information from public federation service"
            }
            Self::PeerHandshakeFailed => "federation request to target service failed",
        }
    }
}

/// Errors that can occur during federation discovery and handshake
#[derive(Error, Debug)]
pub enum FederationError {
    /// A record or request failed a usability check
    #[error("{}", .0.message())]
    Validation(ValidationKind),

    /// A registry or peer round trip failed
    #[error("{}", .0.message())]
    Discovery(DiscoveryKind),

    /// The federation cache could not be read or written
    #[error("federation cache error: {0}")]
    Cache(String),

    /// An injected capability (encryption, license, config) failed
    #[error("capability error: {0}")]
    Capability(String),

    /// Configuration is invalid or missing required fields
    #[error("configuration error: {0}")]
    Config(String),
}

impl FederationError {
    /// Returns the validation kind, if this is a validation error
    #[must_use]
    pub const fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the discovery kind, if this is a discovery error
    #[must_use]
    pub const fn discovery_kind(&self) -> Option<DiscoveryKind> {
        match self {
            Self::Discovery(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the client-facing status code for errors the boundary may expose
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Validation(_) | Self::Discovery(_) => Some(400),
            _ => None,
        }
    }
}

impl From<ValidationKind> for FederationError {
    fn from(kind: ValidationKind) -> Self {
        Self::Validation(kind)
    }
}

impl From<DiscoveryKind> for FederationError {
    fn from(kind: DiscoveryKind) -> Self {
        Self::Discovery(kind)
    }
}

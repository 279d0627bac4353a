//! Federation endpoint clients.

mod peer;
mod registry;

pub use peer::{PeerClient, FEDERATION_CHECKSUM_HEADER, USER_PATH};
pub use registry::{
    RegistryClient, AUTH_CHECKSUM_HEADER, AUTH_KEY_HEADER, FEDERATION_PATH, PUBLIC_KEY_PATH,
};

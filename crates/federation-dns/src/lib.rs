//! DNS SRV discovery of 2ndLock federation peers.
//!
//! A domain takes part in federation by publishing `_2ndlock._tcp.<domain>`
//! SRV records. [`SrvResolver`] is the seam the discovery engine resolves
//! through; [`HickorySrvResolver`] is the production backend.

mod error;
mod srv;

pub use error::{DnsError, DnsResult};
pub use srv::{service_name, HickorySrvResolver, SrvResolver, SERVICE_LABEL};

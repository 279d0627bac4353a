//! Core types and traits for domain federation discovery.
//!
//! This crate provides the foundational types shared by the federation crates:
//!
//! - **Types**: federation records, SRV targets, registry and peer payloads
//! - **Errors**: the client-facing taxonomy in [`FederationError`]
//! - **Capabilities**: traits for the collaborators the engine consumes
//!   (encryption, license, registry host, cache, inbound validation)
//!
//! # Example
//!
//! ```rust,ignore
//! use federation_core::{FederationRecord, Result, ValidationKind};
//!
//! fn pick(record: &FederationRecord) -> Result<String> {
//!     let target = record.primary_target().ok_or(ValidationKind::MissingSrv)?;
//!     Ok(target.authority())
//! }
//! ```

mod capability;
mod error;
pub mod types;

pub use capability::*;
pub use error::{DiscoveryKind, FederationError, Result, ValidationKind};
pub use types::*;

mod envelope;
mod peer;
mod record;
mod registry;
mod scheme;

pub use envelope::*;
pub use peer::*;
pub use record::*;
pub use registry::*;
pub use scheme::*;

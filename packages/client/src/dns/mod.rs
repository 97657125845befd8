//! DNS collaborators
//!
//! Address records, the resolver service seam with its hickory/system
//! implementation, and the hosts/resolv.conf loaders.

pub mod gai;
pub mod hickory;
pub mod hosts;
pub mod record;
pub mod service;
pub mod system;

pub use hickory::HickoryResolverService;
pub use record::AddressRecord;
pub use service::{ResolveFuture, ResolverError, ResolverService};

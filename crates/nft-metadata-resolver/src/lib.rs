//! NFT Metadata Resolver
//!
//! Resolves token metadata URIs to JSON documents. Content-addressed URIs
//! (`ipfs://`, `ipns://`) are fetched through an HTTP gateway and embedded
//! `image` references are rewritten to gateway URLs. Documents are kept in a
//! bounded, time-expiring cache keyed by the original URI.

pub mod error;
pub mod resolver;

pub use error::{ResolverError, Result};
pub use metadata_cache::CacheStats;
pub use resolver::{MetadataResolver, ResolverConfig};

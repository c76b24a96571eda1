//! Fixed-capacity in-memory cache with TTL expiration
//!
//! Entries expire a fixed time after insertion. When the cache is full the
//! oldest-inserted entry is evicted. Reads never refresh an entry's age.

mod cache;
mod types;

pub use cache::MetadataCache;
pub use types::{CacheEntry, CacheStats};

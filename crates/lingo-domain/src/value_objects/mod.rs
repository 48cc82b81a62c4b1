//! Value objects describing cache policy and cache state

pub mod cache;

pub use cache::{CacheDomain, CacheEntry, CacheStats, CacheTtlConfig, MAX_ENTRY_TTL};

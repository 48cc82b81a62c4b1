//! Cache Provider Implementations
//!
//! ## Provider Selection Guide
//!
//! - **Tests / single instance**: `LocalCacheProvider`
//! - **Multi instance**: `RedisCacheProvider`
//! - **Caching disabled**: `NullCacheProvider`

#[cfg(feature = "cache-local")]
pub mod local;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

#[cfg(feature = "cache-local")]
pub use local::LocalCacheProvider;
pub use null::NullCacheProvider;
#[cfg(feature = "cache-redis")]
pub use self::redis::{RedisCacheConfig, RedisCacheProvider};

// Re-export domain types used by cache providers
pub use lingo_domain::value_objects::{CacheDomain, CacheStats, CacheTtlConfig};

use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss counters shared by every backend
///
/// Each read records exactly one of the two.
#[derive(Debug, Default)]
pub(crate) struct HitCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HitCounters {
    /// Record the outcome of one read
    pub(crate) fn record(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Snapshot with the given size
    pub(crate) fn snapshot(&self, size: u64) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size,
        }
    }
}

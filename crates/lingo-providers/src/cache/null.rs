//! Null cache provider
//!
//! Stores nothing. Every read is a miss, every write and invalidation is
//! accepted and dropped. Selected when caching is disabled.

use super::HitCounters;
use async_trait::async_trait;
use lingo_domain::entities::{Interest, InterestCategory, Language, Translations, User, UserStats};
use lingo_domain::error::Result;
use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::{CacheDomain, CacheStats};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Cache provider that never stores anything
///
/// Misses are still counted so `stats()` reflects the traffic the caller
/// would have sent to a real cache.
///
/// # Example
///
/// ```rust
/// use lingo_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider {
    counters: Arc<HitCounters>,
}

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self::default()
    }

    fn miss<T>(&self) -> Option<T> {
        self.counters.record(false);
        None
    }
}

#[async_trait]
impl CacheProvider for NullCacheProvider {
    async fn get_languages(&self, _lang_code: &str) -> Option<Vec<Language>> {
        self.miss()
    }

    async fn set_languages(&self, _lang_code: &str, _languages: &[Language]) {}

    async fn get_interests(&self, _lang_code: &str) -> Option<Vec<Interest>> {
        self.miss()
    }

    async fn set_interests(&self, _lang_code: &str, _interests: &[Interest]) {}

    async fn get_translations(&self, _lang_code: &str) -> Option<Translations> {
        self.miss()
    }

    async fn set_translations(&self, _lang_code: &str, _translations: &Translations) {}

    async fn get_user(&self, _user_id: i64) -> Option<User> {
        self.miss()
    }

    async fn set_user(&self, _user: &User) {}

    async fn get_stats(&self, _stats_type: &str) -> Option<Value> {
        self.miss()
    }

    async fn set_stats(&self, _stats_type: &str, _stats: &Value) {}

    async fn get_interest_categories(&self, _lang_code: &str) -> Option<Vec<InterestCategory>> {
        self.miss()
    }

    async fn set_interest_categories(&self, _lang_code: &str, _categories: &[InterestCategory]) {}

    async fn get_user_stats(&self, _user_id: i64) -> Option<UserStats> {
        self.miss()
    }

    async fn set_user_stats(&self, _user_id: i64, _stats: &UserStats) {}

    async fn get_config(&self, _key: &str) -> Option<Value> {
        self.miss()
    }

    async fn set_config(&self, _key: &str, _value: &Value) {}

    async fn get_json_with(
        &self,
        _key: &str,
        _accept: &mut (dyn for<'a> FnMut(&'a str) -> bool + Send),
    ) -> Option<String> {
        self.miss()
    }

    async fn set_json(&self, _key: &str, _value: &str, _ttl: Duration) {}

    async fn delete(&self, _key: &str) {}

    async fn invalidate(&self, _domain: CacheDomain, _key: &str) {}

    async fn invalidate_domain(&self, _domain: CacheDomain) {}

    async fn clear_all(&self) {}

    async fn stats(&self) -> CacheStats {
        self.counters.snapshot(0)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn stop(&self) {}

    fn provider_name(&self) -> &str {
        "null"
    }
}

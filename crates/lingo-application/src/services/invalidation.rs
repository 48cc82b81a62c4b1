//! Cache Invalidation Service
//!
//! Named invalidation intents mapped onto the cache port. Holds no state of
//! its own beyond the shared provider handle.

use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::CacheDomain;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Domain-level invalidation over any [`CacheProvider`]
#[derive(Debug, Clone)]
pub struct CacheInvalidationService {
    cache: Arc<dyn CacheProvider>,
}

impl CacheInvalidationService {
    /// Create the service over a shared provider
    pub fn new(cache: Arc<dyn CacheProvider>) -> Self {
        Self { cache }
    }

    /// A user's profile changed: drop their snapshot and statistics
    pub async fn invalidate_user_data(&self, user_id: i64) {
        self.cache.invalidate_user(user_id).await;
        debug!(user_id, "Invalidated user cache data");
    }

    /// A user's activity changed: drop only their statistics
    pub async fn invalidate_user_stats(&self, user_id: i64) {
        self.cache
            .invalidate(CacheDomain::UserStats, &user_id.to_string())
            .await;
        debug!(user_id, "Invalidated user statistics");
    }

    /// Reference data for one language changed
    pub async fn invalidate_language_data(&self, lang_code: &str) {
        for domain in CacheDomain::STATIC {
            self.cache.invalidate(domain, lang_code).await;
        }
        info!(lang_code, "Invalidated language reference data");
    }

    /// Translation bundles were redeployed
    pub async fn invalidate_translations(&self) {
        self.cache
            .invalidate_domain(CacheDomain::Translations)
            .await;
        info!("Invalidated all translations");
    }

    /// Languages, interests, interest categories and translations changed
    pub async fn invalidate_static_data(&self) {
        for domain in CacheDomain::STATIC {
            self.cache.invalidate_domain(domain).await;
        }
        info!(domains = CacheDomain::STATIC.len(), "Invalidated static reference data");
    }

    /// Aggregated statistics must be recomputed
    pub async fn invalidate_stats(&self) {
        self.cache.invalidate_domain(CacheDomain::Stats).await;
        info!("Invalidated aggregated statistics");
    }

    /// One configuration value changed
    pub async fn invalidate_config(&self, key: &str) {
        self.cache.invalidate(CacheDomain::Config, key).await;
        debug!(key, "Invalidated configuration value");
    }

    /// Drop everything the backend holds
    ///
    /// On the Redis backend this flushes the whole logical database. Only
    /// operator tooling should reach this.
    pub async fn invalidate_all(&self) {
        warn!(
            provider = self.cache.provider_name(),
            "Clearing the entire cache"
        );
        self.cache.clear_all().await;
    }

    /// Provider this service invalidates
    pub fn provider(&self) -> &Arc<dyn CacheProvider> {
        &self.cache
    }
}

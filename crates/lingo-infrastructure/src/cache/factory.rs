//! Cache provider factory

use crate::config::{CacheBackend, CacheConfig, RedisConfig};
use crate::config::loader::validate_cache_config;
use lingo_domain::error::Result;
use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::CacheTtlConfig;
use lingo_providers::cache::{
    LocalCacheProvider, NullCacheProvider, RedisCacheConfig, RedisCacheProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Builds cache backends behind the provider port
pub struct CacheProviderFactory;

impl CacheProviderFactory {
    /// Backend selected by configuration
    ///
    /// - disabled: [`NullCacheProvider`]
    /// - `local`: [`LocalCacheProvider`] with its sweeper running
    /// - `redis`: [`RedisCacheProvider`], failing fast if Redis is unreachable
    ///
    /// Must be called from within a tokio runtime.
    pub async fn create(config: &CacheConfig) -> Result<Arc<dyn CacheProvider>> {
        validate_cache_config(config)?;

        if !config.enabled {
            info!("Caching disabled, using null cache provider");
            return Ok(Self::create_null());
        }

        let ttl = CacheTtlConfig::from(config.ttl);
        let provider = match config.backend {
            CacheBackend::Local => Self::create_local(ttl, config.sweep_interval()),
            CacheBackend::Redis => Self::create_redis(&config.redis, ttl).await?,
        };

        info!(provider = provider.provider_name(), "Cache provider ready");
        Ok(provider)
    }

    /// Backend that stores nothing
    pub fn create_null() -> Arc<dyn CacheProvider> {
        Arc::new(NullCacheProvider::new())
    }

    /// In-process backend with a running sweeper
    pub fn create_local(ttl: CacheTtlConfig, sweep_interval: Duration) -> Arc<dyn CacheProvider> {
        Arc::new(LocalCacheProvider::with_sweeper(ttl, sweep_interval))
    }

    /// Redis backend; connects and pings before returning
    pub async fn create_redis(
        config: &RedisConfig,
        ttl: CacheTtlConfig,
    ) -> Result<Arc<dyn CacheProvider>> {
        let provider = RedisCacheProvider::connect(RedisCacheConfig::from(config), ttl).await?;
        Ok(Arc::new(provider))
    }
}

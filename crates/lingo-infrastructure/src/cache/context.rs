//! Cache context
//!
//! The composed cache subsystem handed to the service layer: one provider
//! instance plus the services that share it.

use super::CacheProviderFactory;
use crate::config::CacheConfig;
use lingo_application::{CacheInvalidationService, CacheMetricsService};
use lingo_domain::error::Result;
use lingo_domain::ports::providers::CacheProvider;
use std::sync::Arc;
use tracing::info;

/// Composed cache subsystem
#[derive(Debug, Clone)]
pub struct CacheContext {
    /// Configured backend
    pub provider: Arc<dyn CacheProvider>,
    /// Domain-level invalidation over `provider`
    pub invalidation: Arc<CacheInvalidationService>,
    /// Latency and error metrics over `provider`
    pub metrics: Arc<CacheMetricsService>,
}

impl CacheContext {
    /// Build the configured backend and the services over it
    pub async fn build(config: &CacheConfig) -> Result<Self> {
        let provider = CacheProviderFactory::create(config).await?;
        Ok(Self::from_provider(provider))
    }

    /// Wire the services over an existing provider
    pub fn from_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self {
            invalidation: Arc::new(CacheInvalidationService::new(Arc::clone(&provider))),
            metrics: Arc::new(CacheMetricsService::new(Arc::clone(&provider))),
            provider,
        }
    }

    /// Stop background work and log the final statistics
    pub async fn shutdown(&self) {
        self.provider.stop();
        let stats = self.provider.stats().await;
        info!(
            provider = self.provider.provider_name(),
            %stats,
            "Cache shut down"
        );
    }
}

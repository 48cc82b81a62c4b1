//! Cache services over the [`CacheProvider`](lingo_domain::ports::CacheProvider) port

pub mod invalidation;
pub mod metrics;

pub use invalidation::CacheInvalidationService;
pub use metrics::{CacheMetrics, CacheMetricsService};

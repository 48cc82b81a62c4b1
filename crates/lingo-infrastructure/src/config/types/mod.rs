//! Configuration types

pub mod app;
pub mod cache;
pub mod logging;

pub use app::AppConfig;
pub use cache::{CacheBackend, CacheConfig, RedisConfig, TtlConfig};
pub use logging::LoggingConfig;

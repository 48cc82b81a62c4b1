//! # lingo-cache - Provider Implementations
//!
//! Concrete backends for the [`CacheProvider`] port defined in
//! `lingo-domain`.
//!
//! | Provider | Feature | Description |
//! |----------|---------|-------------|
//! | `LocalCacheProvider` | `cache-local` | Process-local maps with a background sweep |
//! | `RedisCacheProvider` | `cache-redis` | Remote store with native per-key TTL |
//! | `NullCacheProvider` | always | Stores nothing |
//!
//! ```toml
//! [dependencies]
//! lingo-providers = { version = "0.1", default-features = false, features = ["cache-local"] }
//! ```

// Re-export lingo-domain types commonly used with providers
pub use lingo_domain::error::{Error, Result};
pub use lingo_domain::ports::providers::{CacheProvider, CacheProviderExt};

/// Provider-specific constants
pub mod constants;

/// Cache provider implementations
pub mod cache;

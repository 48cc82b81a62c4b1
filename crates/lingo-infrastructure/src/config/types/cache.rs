//! Cache configuration types

use lingo_domain::constants::*;
use lingo_domain::value_objects::CacheTtlConfig;
use lingo_providers::cache::RedisCacheConfig;
use lingo_providers::constants::{
    LOCAL_SWEEP_INTERVAL_SECS, REDIS_DEFAULT_ADDRESS, REDIS_DEFAULT_DB, REDIS_DIAL_TIMEOUT_MS,
    REDIS_OPERATION_TIMEOUT_MS, REDIS_SCAN_COUNT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map with a background sweep
    #[default]
    Local,
    /// Distributed cache (Redis)
    Redis,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Cache enabled; when disabled every read misses
    pub enabled: bool,

    /// Backend selected when enabled
    pub backend: CacheBackend,

    /// Seconds between sweeps of the local backend
    pub sweep_interval_secs: u64,

    /// Per-domain TTLs
    pub ttl: TtlConfig,

    /// Redis connection (for the Redis backend)
    pub redis: RedisConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackend::Local,
            sweep_interval_secs: LOCAL_SWEEP_INTERVAL_SECS,
            ttl: TtlConfig::default(),
            redis: RedisConfig::default(),
        }
    }
}

impl CacheConfig {
    /// Sweep cadence of the local backend
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Per-domain TTLs in seconds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TtlConfig {
    /// Language lists
    pub languages: u64,
    /// Interest lists
    pub interests: u64,
    /// Translation maps
    pub translations: u64,
    /// User snapshots
    pub users: u64,
    /// Statistics, aggregated and per user
    pub stats: u64,
    /// Interest category lists
    pub interest_categories: u64,
    /// Configuration values
    pub config: u64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES_TTL_SECS,
            interests: DEFAULT_INTERESTS_TTL_SECS,
            translations: DEFAULT_TRANSLATIONS_TTL_SECS,
            users: DEFAULT_USERS_TTL_SECS,
            stats: DEFAULT_STATS_TTL_SECS,
            interest_categories: DEFAULT_INTEREST_CATEGORIES_TTL_SECS,
            config: DEFAULT_CONFIG_TTL_SECS,
        }
    }
}

impl TtlConfig {
    /// `(name, seconds)` for every field, used by validation
    pub fn entries(&self) -> [(&'static str, u64); 7] {
        [
            ("languages", self.languages),
            ("interests", self.interests),
            ("translations", self.translations),
            ("users", self.users),
            ("stats", self.stats),
            ("interest_categories", self.interest_categories),
            ("config", self.config),
        ]
    }
}

impl From<TtlConfig> for CacheTtlConfig {
    fn from(ttl: TtlConfig) -> Self {
        Self {
            languages: Duration::from_secs(ttl.languages),
            interests: Duration::from_secs(ttl.interests),
            translations: Duration::from_secs(ttl.translations),
            users: Duration::from_secs(ttl.users),
            stats: Duration::from_secs(ttl.stats),
            interest_categories: Duration::from_secs(ttl.interest_categories),
            config: Duration::from_secs(ttl.config),
        }
    }
}

/// Redis connection configuration
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RedisConfig {
    /// `host:port` or a full `redis://` URL
    pub address: String,

    /// Password, if the server requires one
    pub password: Option<String>,

    /// Logical database index
    pub db: i64,

    /// Connection timeout in milliseconds
    pub dial_timeout_ms: u64,

    /// Per-command timeout in milliseconds
    pub operation_timeout_ms: u64,

    /// Keys requested per SCAN step during domain invalidation
    pub scan_count: usize,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            address: REDIS_DEFAULT_ADDRESS.to_string(),
            password: None,
            db: REDIS_DEFAULT_DB,
            dial_timeout_ms: REDIS_DIAL_TIMEOUT_MS,
            operation_timeout_ms: REDIS_OPERATION_TIMEOUT_MS,
            scan_count: REDIS_SCAN_COUNT,
        }
    }
}

impl std::fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConfig")
            .field("address", &self.address)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("db", &self.db)
            .field("dial_timeout_ms", &self.dial_timeout_ms)
            .field("operation_timeout_ms", &self.operation_timeout_ms)
            .field("scan_count", &self.scan_count)
            .finish()
    }
}

impl From<&RedisConfig> for RedisCacheConfig {
    fn from(config: &RedisConfig) -> Self {
        Self {
            address: config.address.clone(),
            password: config.password.clone(),
            db: config.db,
            dial_timeout: Duration::from_millis(config.dial_timeout_ms),
            operation_timeout: Duration::from_millis(config.operation_timeout_ms),
            scan_count: config.scan_count,
        }
    }
}

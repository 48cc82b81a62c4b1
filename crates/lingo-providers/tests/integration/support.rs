//! Shared Redis fixtures

use lingo_domain::value_objects::CacheTtlConfig;
use lingo_providers::cache::{RedisCacheConfig, RedisCacheProvider};
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};

/// Database reserved for tests; every test flushes it
const TEST_DB: i64 = 15;

/// Tests flush the shared database, so they take turns
static REDIS_LOCK: Mutex<()> = Mutex::const_new(());

pub async fn exclusive() -> MutexGuard<'static, ()> {
    REDIS_LOCK.lock().await
}

pub fn redis_config() -> RedisCacheConfig {
    RedisCacheConfig {
        address: std::env::var("LINGO_TEST_REDIS_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:6379".to_string()),
        db: TEST_DB,
        ..RedisCacheConfig::default()
    }
}

pub async fn redis_provider(ttl: CacheTtlConfig) -> RedisCacheProvider {
    RedisCacheProvider::connect(redis_config(), ttl)
        .await
        .expect("Redis must be reachable for integration tests")
}

pub fn short_ttl() -> CacheTtlConfig {
    CacheTtlConfig::uniform(Duration::from_millis(50))
}

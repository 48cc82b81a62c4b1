//! Redis Cache Provider Tests
//!
//! Note: These tests require a Redis server to be running.

use crate::support::{exclusive, redis_config, redis_provider, short_ttl};
use lingo_domain::entities::{Language, User, UserStats};
use lingo_domain::ports::providers::{CacheProvider, CacheProviderExt};
use lingo_domain::value_objects::{CacheDomain, CacheTtlConfig};
use lingo_providers::cache::{RedisCacheConfig, RedisCacheProvider};
use serde_json::json;
use std::time::Duration;

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_languages_roundtrip() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;

    provider
        .set_languages("en", &[Language::new(1, "en", "English")])
        .await;

    let cached = provider.get_languages("en").await.unwrap();
    assert_eq!(cached[0].code, "en");
    assert_eq!(provider.stats().await.size, 1);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_native_expiry() {
    let _guard = exclusive().await;
    let provider = redis_provider(short_ttl()).await;
    provider.clear_all().await;

    provider.set_user(&User::new(9, 900, "Ann")).await;
    assert!(provider.get_user(9).await.is_some());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(provider.get_user(9).await.is_none());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_invalidate_domain_uses_prefix() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;

    provider.set_user(&User::new(1, 100, "Ann")).await;
    provider.set_user(&User::new(2, 200, "Bob")).await;
    provider.set_user_stats(1, &UserStats::default()).await;

    provider.invalidate_domain(CacheDomain::Users).await;

    assert!(provider.get_user(1).await.is_none());
    assert!(provider.get_user(2).await.is_none());
    // `user_stats:` shares no prefix with `user:`
    assert!(provider.get_user_stats(1).await.is_some());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_batch_operations() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;

    let entries = vec![
        ("batch:a".to_string(), "1".to_string()),
        ("batch:b".to_string(), "2".to_string()),
    ];
    provider
        .set_many_json(&entries, Duration::from_secs(60))
        .await;

    let keys = vec![
        "batch:a".to_string(),
        "batch:missing".to_string(),
        "batch:b".to_string(),
    ];
    let values = provider.get_many_json(&keys).await;
    assert_eq!(
        values,
        vec![Some("1".to_string()), None, Some("2".to_string())]
    );

    assert_eq!(provider.delete_many(&keys).await, 2);
    assert!(provider.get_json("batch:a").await.is_none());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_typed_extension() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;

    provider
        .set("flags", &json!({"beta": true}), Duration::from_secs(60))
        .await;

    let flags: Option<serde_json::Value> = provider.get("flags").await;
    assert_eq!(flags, Some(json!({"beta": true})));
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_clones_share_counters() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;
    let scoped = provider.with_deadline(Duration::from_millis(500));

    scoped.get_config("missing").await;

    assert_eq!(provider.stats().await.misses, 1);
    assert_eq!(scoped.operation_timeout(), Duration::from_millis(500));
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_health_check() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;

    assert!(provider.health_check().await.is_ok());
    assert_eq!(provider.provider_name(), "redis");
}

#[tokio::test]
async fn test_redis_provider_unreachable_fails_fast() {
    let config = RedisCacheConfig {
        // Reserved TEST-NET address, never routable
        address: "192.0.2.1:6379".to_string(),
        dial_timeout: Duration::from_millis(200),
        ..redis_config()
    };

    let started = std::time::Instant::now();
    let result = RedisCacheProvider::connect(config, CacheTtlConfig::default()).await;

    assert!(result.is_err());
    assert!(result.unwrap_err().is_transport());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_undecodable_value_counts_as_miss() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;

    provider
        .set_json("decode:k", "\"not a number\"", Duration::from_secs(60))
        .await;
    let number: Option<i32> = provider.get("decode:k").await;

    assert!(number.is_none());
    let stats = provider.stats().await;
    assert_eq!((stats.hits, stats.misses), (0, 1));
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_provider_unbounded_ttl_is_capped() {
    let _guard = exclusive().await;
    let provider = redis_provider(CacheTtlConfig::default()).await;
    provider.clear_all().await;

    provider.set_json("forever", "1", Duration::MAX).await;

    assert_eq!(provider.get_json("forever").await.as_deref(), Some("1"));
}

//! Local Cache Provider Tests

use lingo_domain::entities::{Interest, InterestCategory, Language, Translations, User, UserStats};
use lingo_domain::ports::providers::{CacheProvider, CacheProviderExt};
use lingo_domain::value_objects::{CacheDomain, CacheTtlConfig};
use lingo_providers::cache::LocalCacheProvider;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TestValue {
    data: String,
    number: i32,
}

fn provider() -> LocalCacheProvider {
    LocalCacheProvider::new(CacheTtlConfig::default())
}

fn short_lived(ttl: Duration) -> LocalCacheProvider {
    LocalCacheProvider::new(CacheTtlConfig::uniform(ttl))
}

fn english() -> Vec<Language> {
    vec![Language::new(1, "en", "English")]
}

#[tokio::test]
async fn test_local_provider_languages_roundtrip() {
    let provider = provider();

    provider.set_languages("en", &english()).await;

    let cached = provider.get_languages("en").await.unwrap();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].code, "en");
    assert_eq!(cached[0].name_en, "English");
}

#[tokio::test]
async fn test_local_provider_every_domain_roundtrip() {
    let provider = provider();
    let mut translations = Translations::new();
    translations.insert("greeting".to_string(), "Hello".to_string());
    let interests = vec![Interest {
        id: 3,
        key_name: "music".to_string(),
        category_id: 1,
        display_order: 1,
        name: "Music".to_string(),
    }];
    let categories = vec![InterestCategory {
        id: 1,
        key_name: "hobbies".to_string(),
        display_order: 1,
        name: "Hobbies".to_string(),
    }];
    let user_stats = UserStats {
        user_id: 42,
        interests_count: 5,
        ..UserStats::default()
    };

    provider.set_interests("en", &interests).await;
    provider.set_translations("en", &translations).await;
    provider.set_user(&User::new(42, 4200, "Ann")).await;
    provider.set_stats("daily", &json!({"active": 10})).await;
    provider.set_interest_categories("en", &categories).await;
    provider.set_user_stats(42, &user_stats).await;
    provider
        .set_config("feature_flags", &json!({"beta": true}))
        .await;

    assert_eq!(provider.get_interests("en").await, Some(interests));
    assert_eq!(provider.get_translations("en").await, Some(translations));
    assert_eq!(provider.get_user(42).await.unwrap().first_name, "Ann");
    assert_eq!(
        provider.get_stats("daily").await,
        Some(json!({"active": 10}))
    );
    assert_eq!(
        provider.get_interest_categories("en").await,
        Some(categories)
    );
    assert_eq!(provider.get_user_stats(42).await.unwrap().interests_count, 5);
    assert_eq!(
        provider.get_config("feature_flags").await,
        Some(json!({"beta": true}))
    );
}

#[tokio::test]
async fn test_local_provider_expired_entry_is_a_miss() {
    let provider = short_lived(Duration::from_millis(1));

    provider.set_languages("en", &english()).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(provider.get_languages("en").await.is_none());
}

#[tokio::test]
async fn test_local_provider_counts_hits_and_misses() {
    let provider = provider();

    assert!(provider.get_languages("en").await.is_none());
    provider.set_languages("en", &english()).await;
    assert!(provider.get_languages("en").await.is_some());
    assert!(provider.get_languages("en").await.is_some());

    let stats = provider.stats().await;
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.size, 1);
    assert!((stats.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_local_provider_stats_do_not_count_as_reads() {
    let provider = provider();

    provider.stats().await;
    provider.summary().await;

    assert_eq!(provider.stats().await.requests(), 0);
}

#[tokio::test]
async fn test_local_provider_summary_line() {
    let provider = provider();
    provider.get_user(1).await;

    assert_eq!(
        provider.summary().await,
        "Cache Stats: Hits=0, Misses=1, Size=0, Hit Rate=0.00%"
    );
}

#[tokio::test]
async fn test_local_provider_overwrite_replaces_value() {
    let provider = provider();

    provider.set_languages("en", &english()).await;
    provider
        .set_languages("en", &[Language::new(2, "de", "German")])
        .await;

    let cached = provider.get_languages("en").await.unwrap();
    assert_eq!(cached[0].code, "de");
    assert_eq!(provider.stats().await.size, 1);
}

#[tokio::test]
async fn test_local_provider_invalidate_single_key() {
    let provider = provider();

    provider.set_languages("en", &english()).await;
    provider.set_languages("ru", &english()).await;
    provider.invalidate(CacheDomain::Languages, "en").await;
    provider.invalidate(CacheDomain::Languages, "missing").await;

    assert!(provider.get_languages("en").await.is_none());
    assert!(provider.get_languages("ru").await.is_some());
}

#[tokio::test]
async fn test_local_provider_invalidate_domain_is_isolated() {
    let provider = provider();

    provider.set_languages("en", &english()).await;
    provider.set_languages("ru", &english()).await;
    provider.set_translations("en", &Translations::new()).await;

    provider.invalidate_domain(CacheDomain::Languages).await;

    assert!(provider.get_languages("en").await.is_none());
    assert!(provider.get_languages("ru").await.is_none());
    assert!(provider.get_translations("en").await.is_some());
}

#[tokio::test]
async fn test_local_provider_invalidate_user_removes_both_entries() {
    let provider = provider();

    provider.set_user(&User::new(5, 500, "Bob")).await;
    provider.set_user_stats(5, &UserStats::default()).await;
    provider.set_user(&User::new(6, 600, "Eve")).await;

    provider.invalidate_user(5).await;

    assert!(provider.get_user(5).await.is_none());
    assert!(provider.get_user_stats(5).await.is_none());
    assert!(provider.get_user(6).await.is_some());
}

#[tokio::test]
async fn test_local_provider_clear_all_empties_every_domain() {
    let provider = provider();

    provider.set_languages("en", &english()).await;
    provider.set_translations("en", &Translations::new()).await;
    provider.set_user(&User::new(1, 100, "Ann")).await;
    provider.set_stats("daily", &json!(1)).await;
    provider.set_config("limits", &json!({"max": 3})).await;

    provider.clear_all().await;

    assert_eq!(provider.stats().await.size, 0);
    assert!(provider.get_languages("en").await.is_none());
    assert!(provider.get_translations("en").await.is_none());
    assert!(provider.get_user(1).await.is_none());
    assert!(provider.get_stats("daily").await.is_none());
    assert!(provider.get_config("limits").await.is_none());
}

#[tokio::test]
async fn test_local_provider_expired_entries_count_until_swept() {
    let provider = short_lived(Duration::from_millis(1));

    provider.set_languages("en", &english()).await;
    provider.set_user(&User::new(1, 100, "Ann")).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(provider.get_languages("en").await.is_none());
    assert_eq!(provider.stats().await.size, 2);

    assert_eq!(provider.sweep_expired(), 2);
    assert_eq!(provider.stats().await.size, 0);
}

#[tokio::test]
async fn test_local_provider_generic_json() {
    let provider = provider();
    let value = TestValue {
        data: "test data".to_string(),
        number: 42,
    };

    let json = serde_json::to_string(&value).unwrap();
    provider
        .set_json("test_key", &json, Duration::from_secs(60))
        .await;

    let retrieved_json = provider.get_json("test_key").await;
    let retrieved: Option<TestValue> = retrieved_json.map(|j| serde_json::from_str(&j).unwrap());
    assert_eq!(retrieved, Some(value));

    provider.delete("test_key").await;
    provider.delete("test_key").await;
    assert!(provider.get_json("test_key").await.is_none());
}

#[tokio::test]
async fn test_local_provider_typed_extension() {
    let provider = provider();
    let value = TestValue {
        data: "typed".to_string(),
        number: 7,
    };

    provider
        .set("session:1", &value, Duration::from_secs(60))
        .await;

    let retrieved: Option<TestValue> = provider.get("session:1").await;
    assert_eq!(retrieved, Some(value));

    let wrong_shape: Option<Vec<u8>> = provider.get("session:1").await;
    assert!(wrong_shape.is_none());

    let stats = provider.stats().await;
    assert_eq!((stats.hits, stats.misses), (1, 1));
}

#[tokio::test]
async fn test_local_provider_undecodable_value_counts_as_miss() {
    let provider = provider();

    provider
        .set_json("k", "\"not a number\"", Duration::from_secs(60))
        .await;
    let number: Option<i32> = provider.get("k").await;

    assert!(number.is_none());
    let stats = provider.stats().await;
    assert_eq!((stats.hits, stats.misses), (0, 1));
}

#[tokio::test]
async fn test_local_provider_unbounded_ttl_does_not_panic() {
    let provider = provider();

    provider.set_json("forever", "1", Duration::MAX).await;
    provider
        .set("forever:typed", &7_u32, Duration::MAX)
        .await;

    assert_eq!(provider.get_json("forever").await.as_deref(), Some("1"));
    assert_eq!(provider.get::<u32>("forever:typed").await, Some(7));
}

#[tokio::test]
async fn test_local_provider_huge_domain_ttl_does_not_panic() {
    let provider = short_lived(Duration::from_secs(u64::MAX));

    provider.set_languages("en", &english()).await;

    assert!(provider.get_languages("en").await.is_some());
}

#[tokio::test]
async fn test_local_provider_generic_keys_do_not_collide_with_domains() {
    let provider = provider();

    provider.set_user(&User::new(1, 100, "Ann")).await;
    provider.set_json("1", "\"x\"", Duration::from_secs(60)).await;
    provider.invalidate_domain(CacheDomain::Users).await;

    assert_eq!(provider.get_json("1").await.as_deref(), Some("\"x\""));
}

#[tokio::test]
async fn test_local_provider_generic_ttl_is_per_call() {
    let provider = provider();

    provider.set_json("short", "1", Duration::from_millis(1)).await;
    provider.set_json("long", "2", Duration::from_secs(60)).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert!(provider.get_json("short").await.is_none());
    assert!(provider.get_json("long").await.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_local_provider_concurrent_access() {
    let provider = Arc::new(provider());
    let mut handles = Vec::new();

    for task in 0..16_i64 {
        let provider = Arc::clone(&provider);
        handles.push(tokio::spawn(async move {
            for i in 0..50_i64 {
                let id = task * 100 + i;
                provider.set_user(&User::new(id, id, "load")).await;
                assert_eq!(provider.get_user(id).await.unwrap().id, id);
                provider.get_languages("en").await;
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    let stats = provider.stats().await;
    assert_eq!(stats.size, 16 * 50);
    assert_eq!(stats.hits, 16 * 50);
    assert_eq!(stats.misses, 16 * 50);
}

#[tokio::test]
async fn test_local_provider_sweeper_removes_expired_entries() {
    let provider = LocalCacheProvider::with_sweeper(
        CacheTtlConfig::uniform(Duration::from_millis(1)),
        Duration::from_millis(20),
    );
    assert!(provider.is_sweeping());

    provider.set_languages("en", &english()).await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(provider.stats().await.size, 0);
    provider.shutdown().await;
}

#[tokio::test]
async fn test_local_provider_stop_is_idempotent() {
    let provider =
        LocalCacheProvider::with_sweeper(CacheTtlConfig::default(), Duration::from_secs(60));

    provider.stop();
    provider.stop();
    provider.shutdown().await;

    assert!(!provider.is_sweeping());
    assert!(!provider.spawn_sweeper(Duration::from_secs(60)));

    // Still serves reads and writes after stop
    provider.set_languages("en", &english()).await;
    assert!(provider.get_languages("en").await.is_some());
}

#[tokio::test]
async fn test_local_provider_single_sweeper() {
    let provider = provider();

    assert!(!provider.spawn_sweeper(Duration::ZERO));
    assert!(provider.spawn_sweeper(Duration::from_secs(60)));
    assert!(!provider.spawn_sweeper(Duration::from_secs(60)));

    provider.shutdown().await;
}

#[tokio::test]
async fn test_local_provider_identity() {
    let provider = provider();

    assert_eq!(provider.provider_name(), "local");
    assert!(provider.health_check().await.is_ok());
    assert_eq!(
        LocalCacheProvider::default_sweep_interval(),
        Duration::from_secs(300)
    );
}

#[tokio::test]
async fn test_local_provider_behind_trait_object() {
    let provider: Arc<dyn CacheProvider> = Arc::new(provider());

    provider.set_languages("en", &english()).await;
    provider
        .set("flags", &json!({"beta": true}), Duration::from_secs(60))
        .await;

    assert!(provider.get_languages("en").await.is_some());
    let flags: Option<serde_json::Value> = provider.get("flags").await;
    assert_eq!(flags, Some(json!({"beta": true})));
}

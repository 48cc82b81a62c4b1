//! Cache Metrics Service Tests

use lingo_application::CacheMetricsService;
use lingo_domain::entities::Language;
use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::CacheTtlConfig;
use lingo_providers::cache::{LocalCacheProvider, NullCacheProvider};
use std::sync::Arc;
use std::time::Duration;

fn local() -> Arc<dyn CacheProvider> {
    Arc::new(LocalCacheProvider::new(CacheTtlConfig::default()))
}

#[tokio::test]
async fn test_metrics_start_empty() {
    let service = CacheMetricsService::new(local());

    let metrics = service.collect().await;

    assert_eq!(metrics.total_requests, 0);
    assert_eq!(metrics.error_count, 0);
    assert!(metrics.hit_rate.abs() < f64::EPSILON);
    assert!(metrics.error_rate.abs() < f64::EPSILON);
    assert_eq!(metrics.average_response_time, Duration::ZERO);
}

#[tokio::test]
async fn test_metrics_combine_provider_stats() {
    let cache = local();
    let service = CacheMetricsService::new(Arc::clone(&cache));

    cache
        .set_languages("en", &[Language::new(1, "en", "English")])
        .await;
    cache.get_languages("en").await;
    cache.get_languages("en").await;
    cache.get_languages("en").await;
    cache.get_languages("fr").await;

    let metrics = service.collect().await;
    assert_eq!(metrics.stats.hits, 3);
    assert_eq!(metrics.stats.misses, 1);
    assert_eq!(metrics.stats.size, 1);
    assert!((metrics.hit_rate - 0.75).abs() < 1e-9);
}

#[tokio::test]
async fn test_metrics_average_latency_and_error_rate() {
    let service = CacheMetricsService::new(local());

    service.record_request(Duration::from_millis(10));
    service.record_request(Duration::from_millis(30));
    service.record_request(Duration::from_millis(20));
    service.record_request(Duration::from_millis(40));
    service.record_error();

    let metrics = service.collect().await;
    assert_eq!(metrics.total_requests, 4);
    assert_eq!(metrics.error_count, 1);
    assert_eq!(metrics.average_response_time, Duration::from_millis(25));
    assert!((metrics.error_rate - 0.25).abs() < 1e-9);
    assert!(metrics.requests_per_second > 0.0);
}

#[tokio::test]
async fn test_reset_clears_only_local_counters() {
    let cache: Arc<dyn CacheProvider> = Arc::new(NullCacheProvider::new());
    let service = CacheMetricsService::new(Arc::clone(&cache));

    cache.get_user(1).await;
    service.record_request(Duration::from_millis(5));
    service.record_error();

    service.reset_metrics();

    let metrics = service.collect().await;
    assert_eq!(metrics.total_requests, 0);
    assert_eq!(metrics.error_count, 0);
    assert_eq!(metrics.average_response_time, Duration::ZERO);
    assert_eq!(metrics.stats.misses, 1);
}

#[tokio::test]
async fn test_metrics_summary_line() {
    let service = CacheMetricsService::new(local());
    service.record_request(Duration::from_millis(2));

    let summary = service.summary().await;

    assert!(summary.starts_with("Cache Metrics: Hit Rate=0.00%, Requests=1, Avg Response=2.00ms"));
    assert!(summary.contains("Errors=0"));
    assert!(summary.ends_with("Size=0"));
}

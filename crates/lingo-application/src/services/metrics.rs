//! Cache Metrics Service
//!
//! Combines the provider's hit/miss/size snapshot with counters the provider
//! cannot see: request latency and errors raised by the caller's own data
//! path. Resetting touches only these local counters; the provider's
//! statistics are read-only from here.

use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::CacheStats;
use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::info;

/// Snapshot of cache behaviour over the current sampling window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CacheMetrics {
    /// Provider statistics at collection time
    pub stats: CacheStats,
    /// `hits / (hits + misses)` as a fraction
    pub hit_rate: f64,
    /// Requests recorded in the window
    pub total_requests: u64,
    /// Errors recorded in the window
    pub error_count: u64,
    /// `errors / requests` as a fraction
    pub error_rate: f64,
    /// Mean latency of recorded requests
    pub average_response_time: Duration,
    /// Recorded requests divided by the window length
    pub requests_per_second: f64,
    /// Time since the window started
    pub window: Duration,
}

impl fmt::Display for CacheMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache Metrics: Hit Rate={:.2}%, Requests={}, Avg Response={:.2}ms, \
             Errors={}, Error Rate={:.2}%, RPS={:.2}, Size={}",
            self.hit_rate * 100.0,
            self.total_requests,
            self.average_response_time.as_secs_f64() * 1_000.0,
            self.error_count,
            self.error_rate * 100.0,
            self.requests_per_second,
            self.stats.size
        )
    }
}

#[derive(Debug, Default)]
struct Counters {
    total_requests: AtomicU64,
    total_response_time_us: AtomicU64,
    error_count: AtomicU64,
}

/// Latency and error tracking around a cache provider
#[derive(Debug)]
pub struct CacheMetricsService {
    cache: Arc<dyn CacheProvider>,
    counters: Counters,
    window_start: RwLock<Instant>,
}

impl CacheMetricsService {
    /// Start a sampling window over a shared provider
    pub fn new(cache: Arc<dyn CacheProvider>) -> Self {
        Self {
            cache,
            counters: Counters::default(),
            window_start: RwLock::new(Instant::now()),
        }
    }

    /// Record one request and how long it took
    pub fn record_request(&self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.counters.total_requests.fetch_add(1, Ordering::Relaxed);
        self.counters
            .total_response_time_us
            .fetch_add(micros, Ordering::Relaxed);
    }

    /// Record one failed request on the caller's data path
    pub fn record_error(&self) {
        self.counters.error_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Combine provider statistics with the local counters
    #[allow(clippy::cast_precision_loss)]
    pub async fn collect(&self) -> CacheMetrics {
        let stats = self.cache.stats().await;
        let total_requests = self.counters.total_requests.load(Ordering::Relaxed);
        let total_us = self.counters.total_response_time_us.load(Ordering::Relaxed);
        let error_count = self.counters.error_count.load(Ordering::Relaxed);
        let window = self
            .window_start
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed();

        let (average_response_time, error_rate) = if total_requests > 0 {
            (
                Duration::from_micros(total_us / total_requests),
                error_count as f64 / total_requests as f64,
            )
        } else {
            (Duration::ZERO, 0.0)
        };

        let window_secs = window.as_secs_f64();
        let requests_per_second = if window_secs > 0.0 {
            total_requests as f64 / window_secs
        } else {
            0.0
        };

        CacheMetrics {
            stats,
            hit_rate: stats.hit_rate(),
            total_requests,
            error_count,
            error_rate,
            average_response_time,
            requests_per_second,
            window,
        }
    }

    /// Human-readable metrics line
    pub async fn summary(&self) -> String {
        self.collect().await.to_string()
    }

    /// Zero the local counters and restart the window
    pub fn reset_metrics(&self) {
        self.counters.total_requests.store(0, Ordering::Relaxed);
        self.counters
            .total_response_time_us
            .store(0, Ordering::Relaxed);
        self.counters.error_count.store(0, Ordering::Relaxed);
        *self
            .window_start
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
        info!(provider = self.cache.provider_name(), "Cache metrics reset");
    }
}

//! Redis distributed cache provider
//!
//! Stores every value as JSON under a domain-prefixed key
//! (`languages:en`, `user:42`, ...) and lets Redis expire it through its
//! native per-key TTL. There is no sweep.
//!
//! ## Failure model
//!
//! Construction dials and pings under the dial timeout and fails fast.
//! After that every command is bounded by the operation timeout; transport
//! failures are logged and degrade to a miss or a no-op. Only
//! [`CacheProvider::health_check`] propagates them.
//!
//! ## Example
//!
//! ```ignore
//! use lingo_providers::cache::{RedisCacheConfig, RedisCacheProvider};
//!
//! let provider = RedisCacheProvider::connect(RedisCacheConfig::default(), ttl).await?;
//! // A request handler with 200ms left shortens the bound for its own calls
//! let scoped = provider.with_deadline(Duration::from_millis(200));
//! ```

use super::HitCounters;
use crate::constants::*;
use async_trait::async_trait;
use lingo_domain::entities::{Interest, InterestCategory, Language, Translations, User, UserStats};
use lingo_domain::error::{Error, Result};
use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::{CacheDomain, CacheStats, CacheTtlConfig, MAX_ENTRY_TTL};
use redis::aio::ConnectionManager;
use redis::{Client, Cmd, FromRedisValue, RedisResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

/// Connection settings for [`RedisCacheProvider`]
#[derive(Clone)]
pub struct RedisCacheConfig {
    /// `host:port`, or a full `redis://` / `rediss://` URL
    pub address: String,
    /// Password for `AUTH`, if the server requires one
    pub password: Option<String>,
    /// Logical database index
    pub db: i64,
    /// Bound on establishing the connection
    pub dial_timeout: Duration,
    /// Bound on every command round-trip
    pub operation_timeout: Duration,
    /// Keys requested per SCAN step
    pub scan_count: usize,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            address: REDIS_DEFAULT_ADDRESS.to_string(),
            password: None,
            db: REDIS_DEFAULT_DB,
            dial_timeout: Duration::from_millis(REDIS_DIAL_TIMEOUT_MS),
            operation_timeout: Duration::from_millis(REDIS_OPERATION_TIMEOUT_MS),
            scan_count: REDIS_SCAN_COUNT,
        }
    }
}

impl RedisCacheConfig {
    /// Connection URL handed to the Redis client
    ///
    /// The password is percent-encoded; a full URL in `address` is used as is.
    pub fn connection_url(&self) -> String {
        if self.address.contains("://") {
            return self.address.clone();
        }
        match self.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => format!(
                "redis://:{}@{}/{}",
                urlencoding::encode(password),
                self.address,
                self.db
            ),
            None => format!("redis://{}/{}", self.address, self.db),
        }
    }
}

impl std::fmt::Debug for RedisCacheConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheConfig")
            .field("address", &self.address)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("db", &self.db)
            .field("dial_timeout", &self.dial_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .field("scan_count", &self.scan_count)
            .finish()
    }
}

/// Effective bound for a call: a caller deadline may shorten the configured
/// timeout, never lengthen it
pub fn bounded_timeout(configured: Duration, deadline: Duration) -> Duration {
    configured.min(deadline)
}

/// Millisecond TTL for `SET .. PX`; Redis rejects zero and overflowing expiries
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.min(MAX_ENTRY_TTL).as_millis())
        .unwrap_or(u64::MAX)
        .max(1)
}

/// Redis cache provider
///
/// Clones and [`RedisCacheProvider::with_deadline`] handles share one
/// connection manager and one set of hit/miss counters.
#[derive(Clone)]
pub struct RedisCacheProvider {
    conn: ConnectionManager,
    config: Arc<RedisCacheConfig>,
    ttl: CacheTtlConfig,
    op_timeout: Duration,
    counters: Arc<HitCounters>,
}

impl RedisCacheProvider {
    /// Connect and verify the server answers `PING`
    pub async fn connect(config: RedisCacheConfig, ttl: CacheTtlConfig) -> Result<Self> {
        info!(address = %config.address, db = config.db, "Initializing Redis cache provider");

        let client = Client::open(config.connection_url()).map_err(|e| {
            Error::configuration_with_source(
                format!("Invalid Redis connection settings for {}", config.address),
                e,
            )
        })?;

        let conn = timeout(config.dial_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| Error::timeout(format!("redis connect to {}", config.address)))?
            .map_err(|e| {
                Error::network_with_source(
                    format!("Failed to connect to Redis at {}", config.address),
                    e,
                )
            })?;

        let provider = Self {
            conn,
            op_timeout: config.operation_timeout,
            config: Arc::new(config),
            ttl,
            counters: Arc::new(HitCounters::default()),
        };
        provider.health_check().await?;

        info!("Redis connection established");
        Ok(provider)
    }

    /// Handle whose commands are bounded by `min(operation_timeout, deadline)`
    pub fn with_deadline(&self, deadline: Duration) -> Self {
        Self {
            op_timeout: bounded_timeout(self.op_timeout, deadline),
            ..self.clone()
        }
    }

    /// Bound currently applied to each command
    pub fn operation_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// Connection settings
    pub fn config(&self) -> &RedisCacheConfig {
        &self.config
    }

    /// Run one command under the operation timeout
    async fn run<T, F>(&self, operation: &'static str, command: F) -> Result<T>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.op_timeout, command).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(Error::network_with_source(
                format!("Redis {operation} failed"),
                e,
            )),
            Err(_) => Err(Error::timeout(format!("redis {operation}"))),
        }
    }

    /// Send one command on a fresh handle to the shared connection
    async fn query<T>(&self, operation: &'static str, cmd: &Cmd) -> Result<T>
    where
        T: FromRedisValue,
    {
        let mut conn = self.conn.clone();
        self.run(operation, cmd.query_async(&mut conn)).await
    }

    async fn fetch(&self, key: &str) -> Option<String> {
        match self.query("GET", redis::cmd("GET").arg(key)).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Redis GET failed, treating as miss");
                None
            }
        }
    }

    async fn store(&self, key: &str, json: &str, ttl: Duration) {
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(json).arg("PX").arg(ttl_millis(ttl));
        if let Err(e) = self.query::<()>("SET", &cmd).await {
            warn!(key, error = %e, "Redis SET failed, value not cached");
        }
    }

    async fn remove(&self, key: &str) {
        match self.query::<u64>("DEL", redis::cmd("DEL").arg(key)).await {
            Ok(removed) => debug!(key, removed, "Deleted Redis key"),
            Err(e) => warn!(key, error = %e, "Redis DEL failed"),
        }
    }

    async fn get_typed<T>(&self, domain: CacheDomain, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let full_key = domain.key(key);
        let value = self
            .fetch(&full_key)
            .await
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %full_key, error = %e, "Discarding undecodable cache value");
                    None
                }
            });
        self.counters.record(value.is_some());
        trace!(key = %full_key, hit = value.is_some(), "Redis cache lookup");
        value
    }

    async fn set_typed<T>(&self, domain: CacheDomain, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        let full_key = domain.key(key);
        match serde_json::to_string(value) {
            Ok(json) => self.store(&full_key, &json, self.ttl.ttl_for(domain)).await,
            Err(e) => warn!(key = %full_key, error = %e, "Skipping cache write for unencodable value"),
        }
    }

    /// Delete every key matching `pattern` with cursor-based SCAN
    async fn scan_delete(&self, pattern: &str) -> Result<u64> {
        let mut cursor: u64 = 0;
        let mut total_deleted = 0;

        loop {
            let mut scan = redis::cmd("SCAN");
            scan.arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(self.config.scan_count);
            let (next_cursor, keys): (u64, Vec<String>) = self.query("SCAN", &scan).await?;

            if !keys.is_empty() {
                total_deleted += self
                    .query::<u64>("DEL", redis::cmd("DEL").arg(&keys))
                    .await?;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(total_deleted)
    }

    /// Fetch many ad-hoc keys in one round-trip (`MGET`)
    ///
    /// The result is aligned with `keys`. On failure every key reads as a miss.
    pub async fn get_many_json(&self, keys: &[String]) -> Vec<Option<String>> {
        if keys.is_empty() {
            return Vec::new();
        }

        let values = match self
            .query::<Vec<Option<String>>>("MGET", redis::cmd("MGET").arg(keys))
            .await
        {
            Ok(values) if values.len() == keys.len() => values,
            Ok(values) => {
                warn!(
                    expected = keys.len(),
                    received = values.len(),
                    "Redis MGET returned a mismatched reply"
                );
                vec![None; keys.len()]
            }
            Err(e) => {
                warn!(keys = keys.len(), error = %e, "Redis MGET failed, treating as misses");
                vec![None; keys.len()]
            }
        };

        for value in &values {
            self.counters.record(value.is_some());
        }
        values
    }

    /// Store many ad-hoc values with one pipelined round-trip
    pub async fn set_many_json(&self, entries: &[(String, String)], ttl: Duration) {
        if entries.is_empty() {
            return;
        }

        let millis = ttl_millis(ttl);
        let mut pipe = redis::pipe();
        for (key, json) in entries {
            pipe.cmd("SET")
                .arg(key)
                .arg(json)
                .arg("PX")
                .arg(millis)
                .ignore();
        }

        let mut conn = self.conn.clone();
        let command = pipe.query_async::<()>(&mut conn);
        if let Err(e) = self.run("pipelined SET", command).await {
            warn!(entries = entries.len(), error = %e, "Redis pipelined SET failed");
        }
    }

    /// Delete many keys with a single `DEL`; returns how many existed
    pub async fn delete_many(&self, keys: &[String]) -> u64 {
        if keys.is_empty() {
            return 0;
        }

        match self.query::<u64>("DEL", redis::cmd("DEL").arg(keys)).await {
            Ok(removed) => removed,
            Err(e) => {
                warn!(keys = keys.len(), error = %e, "Redis multi-key DEL failed");
                0
            }
        }
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get_languages(&self, lang_code: &str) -> Option<Vec<Language>> {
        self.get_typed(CacheDomain::Languages, lang_code).await
    }

    async fn set_languages(&self, lang_code: &str, languages: &[Language]) {
        self.set_typed(CacheDomain::Languages, lang_code, languages)
            .await;
    }

    async fn get_interests(&self, lang_code: &str) -> Option<Vec<Interest>> {
        self.get_typed(CacheDomain::Interests, lang_code).await
    }

    async fn set_interests(&self, lang_code: &str, interests: &[Interest]) {
        self.set_typed(CacheDomain::Interests, lang_code, interests)
            .await;
    }

    async fn get_translations(&self, lang_code: &str) -> Option<Translations> {
        self.get_typed(CacheDomain::Translations, lang_code).await
    }

    async fn set_translations(&self, lang_code: &str, translations: &Translations) {
        self.set_typed(CacheDomain::Translations, lang_code, translations)
            .await;
    }

    async fn get_user(&self, user_id: i64) -> Option<User> {
        self.get_typed(CacheDomain::Users, &user_id.to_string())
            .await
    }

    async fn set_user(&self, user: &User) {
        self.set_typed(CacheDomain::Users, &user.id.to_string(), user)
            .await;
    }

    async fn get_stats(&self, stats_type: &str) -> Option<Value> {
        self.get_typed(CacheDomain::Stats, stats_type).await
    }

    async fn set_stats(&self, stats_type: &str, stats: &Value) {
        self.set_typed(CacheDomain::Stats, stats_type, stats).await;
    }

    async fn get_interest_categories(&self, lang_code: &str) -> Option<Vec<InterestCategory>> {
        self.get_typed(CacheDomain::InterestCategories, lang_code)
            .await
    }

    async fn set_interest_categories(&self, lang_code: &str, categories: &[InterestCategory]) {
        self.set_typed(CacheDomain::InterestCategories, lang_code, categories)
            .await;
    }

    async fn get_user_stats(&self, user_id: i64) -> Option<UserStats> {
        self.get_typed(CacheDomain::UserStats, &user_id.to_string())
            .await
    }

    async fn set_user_stats(&self, user_id: i64, stats: &UserStats) {
        self.set_typed(CacheDomain::UserStats, &user_id.to_string(), stats)
            .await;
    }

    async fn get_config(&self, key: &str) -> Option<Value> {
        self.get_typed(CacheDomain::Config, key).await
    }

    async fn set_config(&self, key: &str, value: &Value) {
        self.set_typed(CacheDomain::Config, key, value).await;
    }

    async fn get_json_with(
        &self,
        key: &str,
        accept: &mut (dyn for<'a> FnMut(&'a str) -> bool + Send),
    ) -> Option<String> {
        let value = self.fetch(key).await.filter(|json| accept(json));
        self.counters.record(value.is_some());
        trace!(key, hit = value.is_some(), "Redis cache lookup");
        value
    }

    async fn set_json(&self, key: &str, value: &str, ttl: Duration) {
        self.store(key, value, ttl).await;
    }

    async fn delete(&self, key: &str) {
        self.remove(key).await;
    }

    async fn invalidate(&self, domain: CacheDomain, key: &str) {
        self.remove(&domain.key(key)).await;
    }

    async fn invalidate_domain(&self, domain: CacheDomain) {
        let pattern = format!("{}*", domain.key_prefix());
        match self.scan_delete(&pattern).await {
            Ok(removed) => debug!(domain = %domain, removed, "Invalidated Redis cache domain"),
            Err(e) => warn!(domain = %domain, error = %e, "Redis domain invalidation failed"),
        }
    }

    /// Flushes the whole logical database, including keys this provider
    /// did not write. Never expose this to untrusted callers.
    async fn clear_all(&self) {
        match self.query::<()>("FLUSHDB", &redis::cmd("FLUSHDB")).await {
            Ok(()) => info!(db = self.config.db, "Flushed Redis cache database"),
            Err(e) => warn!(db = self.config.db, error = %e, "Redis FLUSHDB failed"),
        }
    }

    async fn stats(&self) -> CacheStats {
        let size = self
            .query::<u64>("DBSIZE", &redis::cmd("DBSIZE"))
            .await
            .unwrap_or_else(|e| {
            warn!(error = %e, "Redis DBSIZE failed, reporting size 0");
            0
        });
        self.counters.snapshot(size)
    }

    async fn health_check(&self) -> Result<()> {
        let pong: String = self.query("PING", &redis::cmd("PING")).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(Error::network(format!(
                "Redis PING returned unexpected reply: {pong}"
            )))
        }
    }

    fn stop(&self) {
        // Connections close when the last handle is dropped
        debug!("Redis cache provider stopped");
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheProvider")
            .field("address", &self.config.address)
            .field("db", &self.config.db)
            .field("operation_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

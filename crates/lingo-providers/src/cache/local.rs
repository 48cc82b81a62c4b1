//! In-process cache provider
//!
//! A map-of-maps store: one `HashMap` per cache domain plus one for ad-hoc
//! JSON keys, all guarded by a single reader/writer lock. Operations are
//! O(1) map accesses, so one lock for every partition is cheap enough.
//!
//! ## Expiry
//!
//! Every read checks `now < expires_at`, so correctness never depends on the
//! sweep. Expired entries are *not* removed on read (that would turn a shared
//! lock into an exclusive one on the hot path); the background sweeper
//! removes them. Until the next sweep `stats().size` still counts them.
//!
//! ## Example
//!
//! ```ignore
//! use lingo_providers::cache::LocalCacheProvider;
//! use lingo_domain::value_objects::CacheTtlConfig;
//! use std::time::Duration;
//!
//! let cache = LocalCacheProvider::with_sweeper(CacheTtlConfig::default(), Duration::from_secs(300));
//! cache.set_languages("en", &languages).await;
//! cache.shutdown().await;
//! ```

use super::HitCounters;
use crate::constants::LOCAL_SWEEP_INTERVAL_SECS;
use async_trait::async_trait;
use lingo_domain::entities::{Interest, InterestCategory, Language, Translations, User, UserStats};
use lingo_domain::error::Result;
use lingo_domain::ports::providers::CacheProvider;
use lingo_domain::value_objects::{CacheDomain, CacheEntry, CacheStats, CacheTtlConfig};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

type Partition<T> = HashMap<String, CacheEntry<T>>;

/// Every partition of the in-process store
#[derive(Debug, Default)]
struct Partitions {
    languages: Partition<Vec<Language>>,
    interests: Partition<Vec<Interest>>,
    translations: Partition<Translations>,
    users: Partition<User>,
    stats: Partition<Value>,
    interest_categories: Partition<Vec<InterestCategory>>,
    user_stats: Partition<UserStats>,
    config: Partition<Value>,
    generic: Partition<String>,
}

fn purge<T>(partition: &mut Partition<T>, now: Instant) -> usize {
    let before = partition.len();
    partition.retain(|_, entry| entry.is_valid_at(now));
    before - partition.len()
}

impl Partitions {
    fn len(&self) -> usize {
        self.languages.len()
            + self.interests.len()
            + self.translations.len()
            + self.users.len()
            + self.stats.len()
            + self.interest_categories.len()
            + self.user_stats.len()
            + self.config.len()
            + self.generic.len()
    }

    fn remove(&mut self, domain: CacheDomain, key: &str) -> bool {
        match domain {
            CacheDomain::Languages => self.languages.remove(key).is_some(),
            CacheDomain::Interests => self.interests.remove(key).is_some(),
            CacheDomain::Translations => self.translations.remove(key).is_some(),
            CacheDomain::Users => self.users.remove(key).is_some(),
            CacheDomain::Stats => self.stats.remove(key).is_some(),
            CacheDomain::InterestCategories => self.interest_categories.remove(key).is_some(),
            CacheDomain::UserStats => self.user_stats.remove(key).is_some(),
            CacheDomain::Config => self.config.remove(key).is_some(),
        }
    }

    fn clear_domain(&mut self, domain: CacheDomain) -> usize {
        fn drain<T>(partition: &mut Partition<T>) -> usize {
            let removed = partition.len();
            partition.clear();
            removed
        }

        match domain {
            CacheDomain::Languages => drain(&mut self.languages),
            CacheDomain::Interests => drain(&mut self.interests),
            CacheDomain::Translations => drain(&mut self.translations),
            CacheDomain::Users => drain(&mut self.users),
            CacheDomain::Stats => drain(&mut self.stats),
            CacheDomain::InterestCategories => drain(&mut self.interest_categories),
            CacheDomain::UserStats => drain(&mut self.user_stats),
            CacheDomain::Config => drain(&mut self.config),
        }
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        purge(&mut self.languages, now)
            + purge(&mut self.interests, now)
            + purge(&mut self.translations, now)
            + purge(&mut self.users, now)
            + purge(&mut self.stats, now)
            + purge(&mut self.interest_categories, now)
            + purge(&mut self.user_stats, now)
            + purge(&mut self.config, now)
            + purge(&mut self.generic, now)
    }
}

/// Remove expired entries under the exclusive lock and log one summary line
fn sweep(partitions: &RwLock<Partitions>) -> usize {
    let removed = partitions
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .purge_expired(Instant::now());
    info!(removed, "Cache sweep removed expired entries");
    removed
}

/// In-process cache provider
///
/// Cheap to share behind an `Arc`. The optional sweeper task holds its own
/// handle to the partitions and stops on [`CacheProvider::stop`] or when the
/// provider is dropped.
pub struct LocalCacheProvider {
    partitions: Arc<RwLock<Partitions>>,
    ttl: CacheTtlConfig,
    counters: HitCounters,
    cancel_token: CancellationToken,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl Default for LocalCacheProvider {
    fn default() -> Self {
        Self::new(CacheTtlConfig::default())
    }
}

impl LocalCacheProvider {
    /// Create a provider without a sweeper
    ///
    /// Expiry is still enforced on every read; stale entries just stay in
    /// memory until [`LocalCacheProvider::sweep_expired`] runs.
    pub fn new(ttl: CacheTtlConfig) -> Self {
        debug!("Initializing local cache provider");
        Self {
            partitions: Arc::new(RwLock::new(Partitions::default())),
            ttl,
            counters: HitCounters::default(),
            cancel_token: CancellationToken::new(),
            sweeper: Mutex::new(None),
        }
    }

    /// Create a provider and start its sweeper
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_sweeper(ttl: CacheTtlConfig, interval: Duration) -> Self {
        let provider = Self::new(ttl);
        provider.spawn_sweeper(interval);
        provider
    }

    /// Start the periodic sweep
    ///
    /// Returns `false` without spawning anything if a sweeper is already
    /// running, the provider was stopped, or `interval` is zero.
    pub fn spawn_sweeper(&self, interval: Duration) -> bool {
        if interval.is_zero() {
            warn!("Refusing to start cache sweeper with a zero interval");
            return false;
        }
        if self.cancel_token.is_cancelled() {
            return false;
        }

        let mut slot = self.sweeper.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }

        let partitions = Arc::clone(&self.partitions);
        let token = self.cancel_token.clone();
        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        sweep(&partitions);
                    }
                }
            }
            debug!("Cache sweeper stopped");
        }));

        debug!(interval_secs = interval.as_secs(), "Cache sweeper started");
        true
    }

    /// Default sweep cadence
    pub fn default_sweep_interval() -> Duration {
        Duration::from_secs(LOCAL_SWEEP_INTERVAL_SECS)
    }

    /// Run one sweep now; returns the number of removed entries
    pub fn sweep_expired(&self) -> usize {
        sweep(&self.partitions)
    }

    /// Whether a sweeper task is running
    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the sweeper and wait for it to exit
    pub async fn shutdown(&self) {
        self.stop();
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!(error = %e, "Cache sweeper ended abnormally");
            }
        }
    }

    /// TTL policy in use
    pub fn ttl_config(&self) -> &CacheTtlConfig {
        &self.ttl
    }

    fn read_partitions(&self) -> RwLockReadGuard<'_, Partitions> {
        self.partitions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_partitions(&self) -> RwLockWriteGuard<'_, Partitions> {
        self.partitions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup<T, F>(&self, domain: &str, key: &str, select: F) -> Option<T>
    where
        T: Clone,
        F: for<'a> Fn(&'a Partitions) -> &'a Partition<T>,
    {
        self.lookup_with(domain, key, select, |_| true)
    }

    /// Lookup whose value must also pass `accept` to count as a hit
    fn lookup_with<T, F, A>(&self, domain: &str, key: &str, select: F, mut accept: A) -> Option<T>
    where
        T: Clone,
        F: for<'a> Fn(&'a Partitions) -> &'a Partition<T>,
        A: FnMut(&T) -> bool,
    {
        let found = {
            let partitions = self.read_partitions();
            select(&*partitions)
                .get(key)
                .filter(|entry| entry.is_valid())
                .map(|entry| entry.data.clone())
        }
        .filter(|data| accept(data));
        self.counters.record(found.is_some());
        trace!(domain, key, hit = found.is_some(), "Local cache lookup");
        found
    }

    fn store<T, F>(&self, key: String, data: T, ttl: Duration, select: F)
    where
        F: for<'a> Fn(&'a mut Partitions) -> &'a mut Partition<T>,
    {
        let entry = CacheEntry::new(data, ttl);
        select(&mut *self.write_partitions()).insert(key, entry);
    }
}

#[async_trait]
impl CacheProvider for LocalCacheProvider {
    async fn get_languages(&self, lang_code: &str) -> Option<Vec<Language>> {
        self.lookup("languages", lang_code, |p| &p.languages)
    }

    async fn set_languages(&self, lang_code: &str, languages: &[Language]) {
        self.store(
            lang_code.to_string(),
            languages.to_vec(),
            self.ttl.languages,
            |p| &mut p.languages,
        );
    }

    async fn get_interests(&self, lang_code: &str) -> Option<Vec<Interest>> {
        self.lookup("interests", lang_code, |p| &p.interests)
    }

    async fn set_interests(&self, lang_code: &str, interests: &[Interest]) {
        self.store(
            lang_code.to_string(),
            interests.to_vec(),
            self.ttl.interests,
            |p| &mut p.interests,
        );
    }

    async fn get_translations(&self, lang_code: &str) -> Option<Translations> {
        self.lookup("translations", lang_code, |p| &p.translations)
    }

    async fn set_translations(&self, lang_code: &str, translations: &Translations) {
        self.store(
            lang_code.to_string(),
            translations.clone(),
            self.ttl.translations,
            |p| &mut p.translations,
        );
    }

    async fn get_user(&self, user_id: i64) -> Option<User> {
        self.lookup("users", &user_id.to_string(), |p| &p.users)
    }

    async fn set_user(&self, user: &User) {
        self.store(user.id.to_string(), user.clone(), self.ttl.users, |p| {
            &mut p.users
        });
    }

    async fn get_stats(&self, stats_type: &str) -> Option<Value> {
        self.lookup("stats", stats_type, |p| &p.stats)
    }

    async fn set_stats(&self, stats_type: &str, stats: &Value) {
        self.store(stats_type.to_string(), stats.clone(), self.ttl.stats, |p| {
            &mut p.stats
        });
    }

    async fn get_interest_categories(&self, lang_code: &str) -> Option<Vec<InterestCategory>> {
        self.lookup("interest_categories", lang_code, |p| {
            &p.interest_categories
        })
    }

    async fn set_interest_categories(&self, lang_code: &str, categories: &[InterestCategory]) {
        self.store(
            lang_code.to_string(),
            categories.to_vec(),
            self.ttl.interest_categories,
            |p| &mut p.interest_categories,
        );
    }

    async fn get_user_stats(&self, user_id: i64) -> Option<UserStats> {
        self.lookup("user_stats", &user_id.to_string(), |p| &p.user_stats)
    }

    async fn set_user_stats(&self, user_id: i64, stats: &UserStats) {
        self.store(
            user_id.to_string(),
            stats.clone(),
            self.ttl.ttl_for(CacheDomain::UserStats),
            |p| &mut p.user_stats,
        );
    }

    async fn get_config(&self, key: &str) -> Option<Value> {
        self.lookup("config", key, |p| &p.config)
    }

    async fn set_config(&self, key: &str, value: &Value) {
        self.store(key.to_string(), value.clone(), self.ttl.config, |p| {
            &mut p.config
        });
    }

    async fn get_json_with(
        &self,
        key: &str,
        accept: &mut (dyn for<'a> FnMut(&'a str) -> bool + Send),
    ) -> Option<String> {
        self.lookup_with("generic", key, |p| &p.generic, |json: &String| accept(json))
    }

    async fn set_json(&self, key: &str, value: &str, ttl: Duration) {
        self.store(key.to_string(), value.to_string(), ttl, |p| &mut p.generic);
    }

    async fn delete(&self, key: &str) {
        self.write_partitions().generic.remove(key);
    }

    async fn invalidate(&self, domain: CacheDomain, key: &str) {
        let removed = self.write_partitions().remove(domain, key);
        debug!(domain = %domain, key, removed, "Invalidated cache entry");
    }

    async fn invalidate_domain(&self, domain: CacheDomain) {
        let removed = self.write_partitions().clear_domain(domain);
        debug!(domain = %domain, removed, "Invalidated cache domain");
    }

    async fn clear_all(&self) {
        *self.write_partitions() = Partitions::default();
        info!("Cleared local cache");
    }

    async fn stats(&self) -> CacheStats {
        let size = self.read_partitions().len();
        self.counters.snapshot(size as u64)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn stop(&self) {
        if !self.cancel_token.is_cancelled() {
            self.cancel_token.cancel();
            debug!("Local cache provider stopped");
        }
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

impl Drop for LocalCacheProvider {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

impl std::fmt::Debug for LocalCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalCacheProvider")
            .field("entries", &self.read_partitions().len())
            .field("stopped", &self.cancel_token.is_cancelled())
            .finish_non_exhaustive()
    }
}

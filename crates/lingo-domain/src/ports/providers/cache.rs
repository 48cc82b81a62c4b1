//! Cache Provider Port
//!
//! The single surface every cache backend satisfies. Call sites depend on
//! `Arc<dyn CacheProvider>` only, so tests can run against the in-process
//! backend while production composes the Redis backend.
//!
//! ## Failure model
//!
//! The cache is an optimization, never a dependency. Reads return `None` on
//! a miss, on expiry and on a value that cannot be decoded. Writes and
//! invalidations return nothing; backends log failures and carry on. Only
//! [`CacheProvider::health_check`] reports an error to the caller.
//!
//! ## Example
//!
//! ```ignore
//! use lingo_domain::ports::providers::CacheProvider;
//!
//! let languages = match cache.get_languages("en").await {
//!     Some(languages) => languages,
//!     None => {
//!         let languages = repository.load_languages("en").await?;
//!         cache.set_languages("en", &languages).await;
//!         languages
//!     }
//! };
//! ```

use crate::entities::{Interest, InterestCategory, Language, Translations, User, UserStats};
use crate::error::Result;
use crate::value_objects::{CacheDomain, CacheStats};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Cache Provider Port
///
/// # Implementations
///
/// - **Local**: process-local map-of-maps with a background sweep
/// - **Redis**: remote key/value store with native per-key TTL
/// - **Null**: stores nothing, used when caching is disabled
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Language list for an interface language
    async fn get_languages(&self, lang_code: &str) -> Option<Vec<Language>>;

    /// Store the language list for an interface language
    async fn set_languages(&self, lang_code: &str, languages: &[Language]);

    /// Interest list localized for a language
    async fn get_interests(&self, lang_code: &str) -> Option<Vec<Interest>>;

    /// Store the interest list localized for a language
    async fn set_interests(&self, lang_code: &str, interests: &[Interest]);

    /// Translation map for a language
    async fn get_translations(&self, lang_code: &str) -> Option<Translations>;

    /// Store the translation map for a language
    async fn set_translations(&self, lang_code: &str, translations: &Translations);

    /// User snapshot by user id
    async fn get_user(&self, user_id: i64) -> Option<User>;

    /// Store a user snapshot under `user.id`
    async fn set_user(&self, user: &User);

    /// Generic statistics blob by statistics type
    async fn get_stats(&self, stats_type: &str) -> Option<Value>;

    /// Store a generic statistics blob
    async fn set_stats(&self, stats_type: &str, stats: &Value);

    /// Interest categories localized for a language
    async fn get_interest_categories(&self, lang_code: &str) -> Option<Vec<InterestCategory>>;

    /// Store the interest categories localized for a language
    async fn set_interest_categories(&self, lang_code: &str, categories: &[InterestCategory]);

    /// Per-user statistics by user id
    async fn get_user_stats(&self, user_id: i64) -> Option<UserStats>;

    /// Store per-user statistics
    async fn set_user_stats(&self, user_id: i64, stats: &UserStats);

    /// Generic configuration value by key
    async fn get_config(&self, key: &str) -> Option<Value>;

    /// Store a generic configuration value
    async fn set_config(&self, key: &str, value: &Value);

    /// Ad-hoc JSON value, kept only if `accept` approves it
    ///
    /// The read is recorded once: as a hit when a value is found and
    /// accepted, as a miss otherwise. A rejected value reads as absent.
    async fn get_json_with(
        &self,
        key: &str,
        accept: &mut (dyn for<'a> FnMut(&'a str) -> bool + Send),
    ) -> Option<String>;

    /// Ad-hoc JSON value outside the named domains
    async fn get_json(&self, key: &str) -> Option<String> {
        self.get_json_with(key, &mut |_: &str| true).await
    }

    /// Store an ad-hoc JSON value with an explicit TTL
    async fn set_json(&self, key: &str, value: &str, ttl: Duration);

    /// Remove an ad-hoc key; absent keys are ignored
    async fn delete(&self, key: &str);

    /// Remove one entry of a domain; absent keys are ignored
    async fn invalidate(&self, domain: CacheDomain, key: &str);

    /// Remove every entry of a domain, leaving other domains untouched
    async fn invalidate_domain(&self, domain: CacheDomain);

    /// Remove the snapshot and statistics of one user
    async fn invalidate_user(&self, user_id: i64) {
        let key = user_id.to_string();
        self.invalidate(CacheDomain::Users, &key).await;
        self.invalidate(CacheDomain::UserStats, &key).await;
    }

    /// Remove everything the backend holds
    async fn clear_all(&self);

    /// Point-in-time statistics; never changes hit/miss counters
    async fn stats(&self) -> CacheStats;

    /// Human-readable statistics line
    async fn summary(&self) -> String {
        self.stats().await.to_string()
    }

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<()>;

    /// Stop background work owned by the backend
    ///
    /// Idempotent: calling it again is a no-op.
    fn stop(&self);

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}

/// Typed access to ad-hoc keys
///
/// Blanket-implemented for every [`CacheProvider`], `dyn CacheProvider`
/// included. Values go through JSON, the same encoding the Redis backend
/// keeps at rest.
#[async_trait]
pub trait CacheProviderExt: CacheProvider {
    /// Decode an ad-hoc value; undecodable values are logged and counted as a miss
    async fn get<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned + Send,
    {
        let mut decoded = None;
        self.get_json_with(key, &mut |json: &str| match serde_json::from_str::<T>(json) {
            Ok(value) => {
                decoded = Some(value);
                true
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding undecodable cache value");
                false
            }
        })
        .await;
        decoded
    }

    /// Encode and store an ad-hoc value; unencodable values are logged and skipped
    async fn set<T>(&self, key: &str, value: &T, ttl: Duration)
    where
        T: Serialize + Sync,
    {
        match serde_json::to_string(value) {
            Ok(json) => self.set_json(key, &json, ttl).await,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Skipping cache write for unencodable value");
            }
        }
    }
}

impl<P: CacheProvider + ?Sized> CacheProviderExt for P {}

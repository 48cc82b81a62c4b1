//! Cache Value Objects
//!
//! The key-space partitions ([`CacheDomain`]), the per-domain TTL policy
//! ([`CacheTtlConfig`]), the TTL-stamped container used by in-process
//! backends ([`CacheEntry`]) and the statistics snapshot ([`CacheStats`]).

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Named partition of the cache key space
///
/// Every domain has its own remote key prefix and its own TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheDomain {
    /// Language lists, keyed by language code
    Languages,
    /// Interest lists, keyed by language code
    Interests,
    /// Translation maps, keyed by language code
    Translations,
    /// User snapshots, keyed by user id
    Users,
    /// Generic statistics blobs, keyed by statistics type
    Stats,
    /// Interest category lists, keyed by language code
    InterestCategories,
    /// Per-user statistics, keyed by user id
    UserStats,
    /// Generic configuration values, keyed by configuration key
    Config,
}

impl CacheDomain {
    /// All domains, in a stable order
    pub const ALL: [CacheDomain; 8] = [
        CacheDomain::Languages,
        CacheDomain::Interests,
        CacheDomain::Translations,
        CacheDomain::Users,
        CacheDomain::Stats,
        CacheDomain::InterestCategories,
        CacheDomain::UserStats,
        CacheDomain::Config,
    ];

    /// Domains holding reference data loaded from static tables
    pub const STATIC: [CacheDomain; 4] = [
        CacheDomain::Languages,
        CacheDomain::Interests,
        CacheDomain::InterestCategories,
        CacheDomain::Translations,
    ];

    /// Remote key prefix, including the trailing `:`
    pub fn key_prefix(self) -> &'static str {
        match self {
            Self::Languages => KEY_PREFIX_LANGUAGES,
            Self::Interests => KEY_PREFIX_INTERESTS,
            Self::Translations => KEY_PREFIX_TRANSLATIONS,
            Self::Users => KEY_PREFIX_USER,
            Self::Stats => KEY_PREFIX_STATS,
            Self::InterestCategories => KEY_PREFIX_INTEREST_CATEGORIES,
            Self::UserStats => KEY_PREFIX_USER_STATS,
            Self::Config => KEY_PREFIX_CONFIG,
        }
    }

    /// Full remote key for a natural key in this domain
    pub fn key(self, natural_key: &str) -> String {
        format!("{}{}", self.key_prefix(), natural_key)
    }

    /// Short name used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Languages => "languages",
            Self::Interests => "interests",
            Self::Translations => "translations",
            Self::Users => "users",
            Self::Stats => "stats",
            Self::InterestCategories => "interest_categories",
            Self::UserStats => "user_stats",
            Self::Config => "config",
        }
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain TTL policy
///
/// Immutable once a backend is constructed. Per-user statistics share the
/// statistics TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtlConfig {
    /// TTL for language lists
    pub languages: Duration,
    /// TTL for interest lists
    pub interests: Duration,
    /// TTL for translation maps
    pub translations: Duration,
    /// TTL for user snapshots
    pub users: Duration,
    /// TTL for statistics (generic and per-user)
    pub stats: Duration,
    /// TTL for interest category lists
    pub interest_categories: Duration,
    /// TTL for generic configuration values
    pub config: Duration,
}

impl CacheTtlConfig {
    /// TTL applied when writing into `domain`
    pub fn ttl_for(&self, domain: CacheDomain) -> Duration {
        match domain {
            CacheDomain::Languages => self.languages,
            CacheDomain::Interests => self.interests,
            CacheDomain::Translations => self.translations,
            CacheDomain::Users => self.users,
            CacheDomain::Stats | CacheDomain::UserStats => self.stats,
            CacheDomain::InterestCategories => self.interest_categories,
            CacheDomain::Config => self.config,
        }
    }

    /// Same TTL for every domain
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            languages: ttl,
            interests: ttl,
            translations: ttl,
            users: ttl,
            stats: ttl,
            interest_categories: ttl,
            config: ttl,
        }
    }
}

impl Default for CacheTtlConfig {
    fn default() -> Self {
        Self {
            languages: Duration::from_secs(DEFAULT_LANGUAGES_TTL_SECS),
            interests: Duration::from_secs(DEFAULT_INTERESTS_TTL_SECS),
            translations: Duration::from_secs(DEFAULT_TRANSLATIONS_TTL_SECS),
            users: Duration::from_secs(DEFAULT_USERS_TTL_SECS),
            stats: Duration::from_secs(DEFAULT_STATS_TTL_SECS),
            interest_categories: Duration::from_secs(DEFAULT_INTEREST_CATEGORIES_TTL_SECS),
            config: Duration::from_secs(DEFAULT_CONFIG_TTL_SECS),
        }
    }
}

/// Longest lifetime an in-process entry can be given (100 years)
pub const MAX_ENTRY_TTL: Duration = Duration::from_secs(MAX_TTL_SECS);

/// `now + ttl` with the TTL capped; never overflows
fn expiry_after(now: Instant, ttl: Duration) -> Instant {
    let ttl = ttl.min(MAX_ENTRY_TTL);
    now.checked_add(ttl)
        .or_else(|| now.checked_add(Duration::from_secs(DEFAULT_CONFIG_TTL_SECS)))
        .unwrap_or(now)
}

/// TTL-stamped container for one cached value
///
/// Validity is recomputed on every call to [`CacheEntry::is_valid`]; it is
/// never stored.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub data: T,
    /// Instant at which the entry stops being valid
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Create an entry expiring `ttl` from now
    ///
    /// A TTL too large for `Instant` is capped at [`MAX_ENTRY_TTL`], so
    /// `Duration::MAX` reads as "never expires" instead of overflowing.
    pub fn new(data: T, ttl: Duration) -> Self {
        Self::expiring_at(data, expiry_after(Instant::now(), ttl))
    }

    /// Create an entry with an explicit expiry instant
    pub fn expiring_at(data: T, expires_at: Instant) -> Self {
        Self { data, expires_at }
    }

    /// `true` while `now < expires_at`
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Instant::now())
    }

    /// Validity relative to a given instant
    pub fn is_valid_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Cache Operation Statistics
///
/// A point-in-time snapshot. `hits` and `misses` grow monotonically over the
/// lifetime of a backend instance; `size` is the number of stored entries.
///
/// # Example
///
/// ```rust
/// use lingo_domain::value_objects::CacheStats;
///
/// let stats = CacheStats { hits: 3, misses: 1, size: 10 };
/// assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of stored entries
    pub size: u64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of reads
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    /// `hits / (hits + misses)`, 0.0 before the first read
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache Stats: Hits={}, Misses={}, Size={}, Hit Rate={:.2}%",
            self.hits,
            self.misses,
            self.size,
            self.hit_rate() * 100.0
        )
    }
}

//! Domain layer constants
//!
//! Remote key prefixes are a wire contract with operational tooling that
//! inspects keys directly; they must not change.

// ============================================================================
// REMOTE KEY NAMESPACE
// ============================================================================

/// Key prefix for language lists, keyed by interface language code
pub const KEY_PREFIX_LANGUAGES: &str = "languages:";

/// Key prefix for interest lists, keyed by language code
pub const KEY_PREFIX_INTERESTS: &str = "interests:";

/// Key prefix for translation maps, keyed by language code
pub const KEY_PREFIX_TRANSLATIONS: &str = "translations:";

/// Key prefix for user snapshots, keyed by user id
pub const KEY_PREFIX_USER: &str = "user:";

/// Key prefix for generic statistics blobs, keyed by statistics type
pub const KEY_PREFIX_STATS: &str = "stats:";

/// Key prefix for interest category lists, keyed by language code
pub const KEY_PREFIX_INTEREST_CATEGORIES: &str = "interest_categories:";

/// Key prefix for per-user statistics, keyed by user id
pub const KEY_PREFIX_USER_STATS: &str = "user_stats:";

/// Key prefix for generic configuration values
pub const KEY_PREFIX_CONFIG: &str = "config:";

// ============================================================================
// DEFAULT TTLS (seconds)
// ============================================================================

/// Default TTL for language lists (1 hour)
pub const DEFAULT_LANGUAGES_TTL_SECS: u64 = 3600;

/// Default TTL for interest lists (1 hour)
pub const DEFAULT_INTERESTS_TTL_SECS: u64 = 3600;

/// Default TTL for translation maps (30 minutes)
pub const DEFAULT_TRANSLATIONS_TTL_SECS: u64 = 1800;

/// Default TTL for user snapshots (15 minutes)
pub const DEFAULT_USERS_TTL_SECS: u64 = 900;

/// Default TTL for statistics (5 minutes)
pub const DEFAULT_STATS_TTL_SECS: u64 = 300;

/// Default TTL for interest category lists (1 hour)
pub const DEFAULT_INTEREST_CATEGORIES_TTL_SECS: u64 = 3600;

/// Default TTL for generic configuration values (24 hours)
pub const DEFAULT_CONFIG_TTL_SECS: u64 = 86_400;

/// Upper bound on any TTL (100 years); larger values are capped or rejected
pub const MAX_TTL_SECS: u64 = 100 * 365 * 86_400;

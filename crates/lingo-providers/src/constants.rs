//! Provider-specific constants

/// Interval between sweeps of the in-process store (5 minutes)
pub const LOCAL_SWEEP_INTERVAL_SECS: u64 = 300;

/// Longest accepted sweep interval (1 day)
pub const MAX_SWEEP_INTERVAL_SECS: u64 = 86_400;

/// Default Redis endpoint
pub const REDIS_DEFAULT_ADDRESS: &str = "127.0.0.1:6379";

/// Default Redis logical database
pub const REDIS_DEFAULT_DB: i64 = 0;

/// Default bound on establishing the Redis connection
pub const REDIS_DIAL_TIMEOUT_MS: u64 = 5_000;

/// Default bound on a single Redis command round-trip
pub const REDIS_OPERATION_TIMEOUT_MS: u64 = 3_000;

/// Keys requested per SCAN step when invalidating a domain
pub const REDIS_SCAN_COUNT: usize = 100;

//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Prefix of configuration environment variables (`LINGO__CACHE__ENABLED`)
pub const CONFIG_ENV_PREFIX: &str = "LINGO";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "lingo.toml";

/// Directory searched for the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Application directory under the user's config and home directories
pub const APP_CONFIG_DIR: &str = "lingo";

// ============================================================================
// LOGGING
// ============================================================================

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV_VAR: &str = "LINGO_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "lingo";

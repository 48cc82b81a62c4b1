//! Configuration loader
//!
//! Sources are merged in this order (later sources override earlier):
//! 1. `AppConfig::default()`
//! 2. TOML file: the explicit path, or the first `lingo.toml` found in the
//!    working directory, `./config/`, the user config dir and `~/.lingo/`
//! 3. Environment variables prefixed `LINGO__`, nested keys separated by
//!    `__` (`LINGO__CACHE__REDIS__ADDRESS=10.0.0.5:6379`)

use crate::config::{AppConfig, CacheBackend, CacheConfig};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use lingo_domain::constants::MAX_TTL_SECS;
use lingo_domain::error::{Error, Result};
use lingo_providers::constants::MAX_SWEEP_INTERVAL_SECS;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&config)?;
        Ok(config)
    }

    /// Layered sources without extraction
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        let prefix = format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix);
        figment.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR))
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).with_context(|| {
            format!("Failed to write config file {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Get the explicit configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing configuration file among the default locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(APP_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{APP_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    validate_cache_config(&config.cache)
}

/// Validate cache configuration
///
/// TTLs and the sweep interval are checked even when the cache is disabled,
/// so re-enabling it never surfaces a latent error.
pub fn validate_cache_config(config: &CacheConfig) -> Result<()> {
    for (name, secs) in config.ttl.entries() {
        if secs == 0 {
            return Err(Error::configuration(format!(
                "Cache TTL for {name} cannot be 0"
            )));
        }
        if secs > MAX_TTL_SECS {
            return Err(Error::configuration(format!(
                "Cache TTL for {name} cannot exceed {MAX_TTL_SECS} seconds: {secs}"
            )));
        }
    }

    if config.sweep_interval_secs == 0 {
        return Err(Error::configuration(
            "Cache sweep interval cannot be 0",
        ));
    }
    if config.sweep_interval_secs > MAX_SWEEP_INTERVAL_SECS {
        return Err(Error::configuration(format!(
            "Cache sweep interval cannot exceed {MAX_SWEEP_INTERVAL_SECS} seconds: {}",
            config.sweep_interval_secs
        )));
    }

    if config.backend == CacheBackend::Redis {
        let redis = &config.redis;
        if redis.address.trim().is_empty() {
            return Err(Error::configuration(
                "Redis address cannot be empty when the redis backend is selected",
            ));
        }
        if redis.dial_timeout_ms == 0 || redis.operation_timeout_ms == 0 {
            return Err(Error::configuration("Redis timeouts cannot be 0"));
        }
        if redis.scan_count == 0 {
            return Err(Error::configuration("Redis scan count cannot be 0"));
        }
        if redis.db < 0 {
            return Err(Error::configuration(format!(
                "Redis database index cannot be negative: {}",
                redis.db
            )));
        }
    }

    Ok(())
}

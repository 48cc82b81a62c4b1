//! Root configuration

use super::{CacheConfig, LoggingConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Cache settings
    pub cache: CacheConfig,
}

//! Infrastructure Layer - lingo-cache
//!
//! Cross-cutting concerns around the cache subsystem:
//!
//! - [`config`]: figment-layered configuration (defaults, TOML file, `LINGO__` env)
//! - [`logging`]: tracing subscriber bootstrap
//! - [`cache`]: composition of the configured backend and the services over it
//! - [`error_ext`]: context adapters from foreign errors to the domain error
//!
//! ## Example
//!
//! ```ignore
//! use lingo_infrastructure::cache::CacheContext;
//! use lingo_infrastructure::config::ConfigLoader;
//! use lingo_infrastructure::logging::init_logging;
//!
//! let config = ConfigLoader::new().load()?;
//! init_logging(config.logging.clone())?;
//! let cache = CacheContext::build(&config.cache).await?;
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use cache::{CacheContext, CacheProviderFactory};
pub use config::{AppConfig, ConfigLoader};

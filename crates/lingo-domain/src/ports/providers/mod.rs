//! Provider ports
//!
//! Contracts implemented by `lingo-providers`.

pub mod cache;

pub use cache::{CacheProvider, CacheProviderExt};

//! Ports (interfaces) implemented by outer layers

pub mod providers;

pub use providers::{CacheProvider, CacheProviderExt};

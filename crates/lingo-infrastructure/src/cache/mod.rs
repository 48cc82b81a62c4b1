//! Cache composition
//!
//! Selects the backend from configuration and wires the application
//! services over it. Call sites receive `Arc<dyn CacheProvider>` and never
//! name a concrete backend.

pub mod context;
pub mod factory;

pub use context::CacheContext;
pub use factory::CacheProviderFactory;

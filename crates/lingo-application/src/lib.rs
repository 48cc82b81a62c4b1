//! Application Layer - lingo-cache
//!
//! Services that let callers reason about the cache in domain terms
//! ("a user's profile changed") instead of cache mechanics ("delete these
//! keys"), plus latency and error metrics the cache port itself does not
//! track.
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `lingo-domain`: entities, value objects and the `CacheProvider` port
//! - Pure Rust libraries for serialization and logging
//!
//! Concrete backends are composed by `lingo-infrastructure`.

pub mod services;

pub use services::{CacheInvalidationService, CacheMetrics, CacheMetricsService};

//! # lingo-cache - Domain Layer
//!
//! Core types shared by every cache backend and by the services built on top
//! of them. This crate has no knowledge of how values are stored; it only
//! describes what is cached and the contract a backend must satisfy.
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`entities`] | Cached domain objects (languages, interests, users, ...) |
//! | [`value_objects`] | Cache domains, TTL policy, entries and statistics |
//! | [`ports`] | The [`CacheProvider`](ports::providers::CacheProvider) port |
//! | [`error`] | Error and result types |
//! | [`constants`] | Key prefixes and default TTLs |

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::providers::{CacheProvider, CacheProviderExt};

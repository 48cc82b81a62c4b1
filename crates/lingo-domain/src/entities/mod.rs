//! Cached domain entities
//!
//! The relational store owns the authoritative records; these are the
//! shapes the cache keeps copies of.

pub mod interest;
pub mod language;
pub mod user;

pub use interest::{Interest, InterestCategory};
pub use language::{Language, Translations};
pub use user::{User, UserStats};

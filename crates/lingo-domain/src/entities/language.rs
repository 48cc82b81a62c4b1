//! Language entities

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entity: Supported Language
///
/// A language users can pick as native, target, or interface language.
///
/// ## Example
///
/// ```rust
/// use lingo_domain::entities::Language;
///
/// let english = Language {
///     id: 1,
///     code: "en".to_string(),
///     name_native: "English".to_string(),
///     name_en: "English".to_string(),
///     is_active: true,
/// };
/// assert_eq!(english.code, "en");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    /// Primary key in the relational store
    pub id: i64,
    /// ISO 639-1 code (`en`, `ru`, ...)
    pub code: String,
    /// Name written in the language itself
    pub name_native: String,
    /// English name
    pub name_en: String,
    /// Whether the language is offered to users
    #[serde(default)]
    pub is_active: bool,
}

impl Language {
    /// Create an active language with the same native and English name
    pub fn new(id: i64, code: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            code: code.into(),
            name_native: name.clone(),
            name_en: name,
            is_active: true,
        }
    }
}

/// Localized UI strings for one language, keyed by message key
pub type Translations = HashMap<String, String>;

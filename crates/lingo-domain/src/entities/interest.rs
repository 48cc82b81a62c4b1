//! Interest entities

use serde::{Deserialize, Serialize};

/// Entity: Interest
///
/// A topic a user can mark as interesting. `name` holds the label localized
/// for the language the list was loaded for, so lists are cached per
/// language code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interest {
    /// Primary key in the relational store
    pub id: i64,
    /// Stable identifier used as translation key
    pub key_name: String,
    /// Owning category
    pub category_id: i64,
    /// Sort position inside the category
    pub display_order: i32,
    /// Localized label
    pub name: String,
}

/// Entity: Interest Category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterestCategory {
    /// Primary key in the relational store
    pub id: i64,
    /// Stable identifier used as translation key
    pub key_name: String,
    /// Sort position
    pub display_order: i32,
    /// Localized label
    pub name: String,
}

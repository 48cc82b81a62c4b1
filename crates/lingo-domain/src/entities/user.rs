//! User entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity: User snapshot
///
/// A cached copy of a user row. The cache does not track who wrote it or
/// when relative to other writers; callers invalidate after every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Primary key in the relational store
    pub id: i64,
    /// Chat platform account id
    pub telegram_id: i64,
    /// Chat platform handle, when the user has one
    pub username: Option<String>,
    /// Display name
    pub first_name: String,
    /// Code of the language the user speaks natively
    pub native_language_code: Option<String>,
    /// Code of the language the user is learning
    pub target_language_code: Option<String>,
    /// Self-assessed level in the target language (`A1`..`C2`)
    pub target_language_level: Option<String>,
    /// Code of the language the bot talks to the user in
    pub interface_language_code: String,
    /// Onboarding state machine position
    pub state: String,
    /// Account status (`active`, `blocked`, ...)
    pub status: String,
    /// Profile completeness, 0..=100
    pub profile_completion_level: i32,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Last row update time
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a freshly registered user
    pub fn new(id: i64, telegram_id: i64, first_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            telegram_id,
            username: None,
            first_name: first_name.into(),
            native_language_code: None,
            target_language_code: None,
            target_language_level: None,
            interface_language_code: "en".to_string(),
            state: "new".to_string(),
            status: "active".to_string(),
            profile_completion_level: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Entity: Per-user statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UserStats {
    /// User these statistics belong to
    pub user_id: i64,
    /// Number of selected interests
    pub interests_count: u32,
    /// Whole days since registration
    pub days_since_registration: u32,
    /// Profile completeness, 0..=100
    pub profile_completion_level: i32,
    /// Last time the user interacted with the bot
    pub last_activity: Option<DateTime<Utc>>,
}

//! Conversation and message domain types.
//!
//! A `Conversation` is owned by exactly one user and carries an
//! `updated_at` stamp refreshed on every appended message -- it is the
//! sort key for the recent-conversations listing. A `Message` is the
//! durable counterpart of an in-memory turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Role of a conversation turn. Two-valued: the completion service
/// models every exchange as user/model alternation, never "assistant"
/// or "system".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// A persisted conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted message within a conversation.
///
/// Ordered by `created_at` ascending within its conversation. Content is
/// mutable only through the explicit edit operation; no edit history is
/// retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Maximum length of a conversation title derived from the first user
/// message. Longer inputs are truncated and suffixed with an ellipsis.
pub const TITLE_MAX_CHARS: usize = 50;

/// Derive a conversation title from the first user message.
///
/// Truncates on a character boundary so multi-byte input never splits.
pub fn derive_title(first_message: &str) -> String {
    let mut title: String = first_message.chars().take(TITLE_MAX_CHARS).collect();
    if first_message.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::User, Role::Model] {
            let s = role.to_string();
            let parsed: Role = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("assistant".parse::<Role>().is_err());
        assert!("system".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Model).unwrap(), "\"model\"");
        let parsed: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(parsed, Role::User);
    }

    #[test]
    fn test_derive_title_short_input_unchanged() {
        assert_eq!(derive_title("hello"), "hello");
    }

    #[test]
    fn test_derive_title_truncates_long_input() {
        let long = "x".repeat(80);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_derive_title_multibyte_boundary() {
        let long = "ṭ".repeat(60);
        let title = derive_title(&long);
        assert!(title.starts_with("ṭ"));
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }
}

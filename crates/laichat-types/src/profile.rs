//! User profile types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's profile record, keyed by their identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert body for the profile endpoint. Field names follow the client's
/// camelCase convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "avatarUrl")]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_camel_case() {
        let body = r#"{"displayName": "Joseph", "avatarUrl": "https://example.com/a.png"}"#;
        let update: ProfileUpdate = serde_json::from_str(body).unwrap();
        assert_eq!(update.display_name.as_deref(), Some("Joseph"));
        assert_eq!(
            update.avatar_url.as_deref(),
            Some("https://example.com/a.png")
        );
    }
}

//! SQLite profile repository implementation.

use chrono::{DateTime, Utc};
use laichat_core::profile::ProfileRepository;
use laichat_types::error::RepositoryError;
use laichat_types::profile::UserProfile;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileRepository`.
pub struct SqliteProfileRepository {
    pool: DatabasePool,
}

impl SqliteProfileRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain UserProfile.
struct ProfileRow {
    id: String,
    display_name: Option<String>,
    avatar_url: Option<String>,
    updated_at: String,
}

impl ProfileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            display_name: row.try_get("display_name")?,
            avatar_url: row.try_get("avatar_url")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_profile(self) -> Result<UserProfile, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid profile id: {e}")))?;
        let updated_at = parse_datetime(&self.updated_at)?;

        Ok(UserProfile {
            id,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            updated_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

impl ProfileRepository for SqliteProfileRepository {
    async fn get_profile(&self, id: &Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM user_profile WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row =
                    ProfileRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_profile()?))
            }
            None => Ok(None),
        }
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO user_profile (id, display_name, avatar_url, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                 display_name = excluded.display_name,
                 avatar_url = excluded.avatar_url,
                 updated_at = excluded.updated_at",
        )
        .bind(profile.id.to_string())
        .bind(&profile.display_name)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    fn make_profile(id: Uuid) -> UserProfile {
        UserProfile {
            id,
            display_name: Some("Joseph".to_string()),
            avatar_url: None,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = SqliteProfileRepository::new(test_pool().await);
        let found = repo.get_profile(&Uuid::now_v7()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_get() {
        let repo = SqliteProfileRepository::new(test_pool().await);
        let id = Uuid::now_v7();

        repo.upsert_profile(&make_profile(id)).await.unwrap();

        let found = repo.get_profile(&id).await.unwrap().unwrap();
        assert_eq!(found.display_name.as_deref(), Some("Joseph"));
        assert!(found.avatar_url.is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let repo = SqliteProfileRepository::new(test_pool().await);
        let id = Uuid::now_v7();
        repo.upsert_profile(&make_profile(id)).await.unwrap();

        let updated = UserProfile {
            id,
            display_name: Some("Za Ceu".to_string()),
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            updated_at: Utc::now(),
        };
        repo.upsert_profile(&updated).await.unwrap();

        let found = repo.get_profile(&id).await.unwrap().unwrap();
        assert_eq!(found.display_name.as_deref(), Some("Za Ceu"));
        assert_eq!(
            found.avatar_url.as_deref(),
            Some("https://example.com/avatar.png")
        );
    }

    #[tokio::test]
    async fn test_upsert_can_clear_fields() {
        let repo = SqliteProfileRepository::new(test_pool().await);
        let id = Uuid::now_v7();
        repo.upsert_profile(&UserProfile {
            id,
            display_name: Some("Joseph".to_string()),
            avatar_url: Some("https://example.com/avatar.png".to_string()),
            updated_at: Utc::now(),
        })
        .await
        .unwrap();

        repo.upsert_profile(&UserProfile {
            id,
            display_name: None,
            avatar_url: None,
            updated_at: Utc::now(),
        })
        .await
        .unwrap();

        let found = repo.get_profile(&id).await.unwrap().unwrap();
        assert!(found.display_name.is_none());
        assert!(found.avatar_url.is_none());
    }
}

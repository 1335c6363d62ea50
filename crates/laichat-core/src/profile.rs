//! Profile persistence: repository trait and service.

use chrono::Utc;
use laichat_types::error::RepositoryError;
use laichat_types::profile::UserProfile;
use uuid::Uuid;

/// Repository trait for the user profile record.
///
/// Implementations live in laichat-infra. Uses native async fn in traits
/// (RPITIT, Rust 2024 edition).
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile by identity, if one exists.
    fn get_profile(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<UserProfile>, RepositoryError>> + Send;

    /// Insert or replace the profile keyed by identity.
    fn upsert_profile(
        &self,
        profile: &UserProfile,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}

/// Thin service over the profile repository.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Fetch the caller's profile. A missing record is not an error; the
    /// endpoint renders it as an empty object.
    pub async fn profile(&self, id: &Uuid) -> Result<Option<UserProfile>, RepositoryError> {
        self.repo.get_profile(id).await
    }

    /// Upsert the caller's profile and return the stored record.
    pub async fn upsert(
        &self,
        id: Uuid,
        display_name: Option<String>,
        avatar_url: Option<String>,
    ) -> Result<UserProfile, RepositoryError> {
        let profile = UserProfile {
            id,
            display_name,
            avatar_url,
            updated_at: Utc::now(),
        };
        self.repo.upsert_profile(&profile).await?;
        Ok(profile)
    }
}

//! Profile endpoint handlers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use laichat_types::profile::{ProfileUpdate, UserProfile};

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::state::AppState;

/// GET /api/profile -- the caller's profile, or `{}` when none exists.
pub async fn get_profile(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Result<Response, AppError> {
    match state.profiles.profile(&user_id).await? {
        Some(profile) => Ok(Json(profile).into_response()),
        None => Ok(Json(json!({})).into_response()),
    }
}

/// POST /api/profile -- upsert keyed by the caller's identity, returning
/// the stored record.
pub async fn update_profile(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Json(body): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state
        .profiles
        .upsert(user_id, body.display_name, body.avatar_url)
        .await?;
    Ok(Json(profile))
}

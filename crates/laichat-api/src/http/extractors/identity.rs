//! Caller identity extractor.
//!
//! Per-user routes read the caller's id from `Authorization: Bearer
//! <uuid>`. The id is opaque: it is parsed and used to scope queries,
//! never verified against an account system. A missing or malformed
//! header rejects the request with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::http::error::AppError;
use crate::state::AppState;

/// The caller's user id, taken from the Authorization header.
pub struct Identity(pub Uuid);

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let id = token.parse::<Uuid>().map_err(|_| {
            AppError::Unauthorized("Identity token is not a valid user id".to_string())
        })?;
        Ok(Identity(id))
    }
}

/// Extract the bearer token from request headers.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth = parts.headers.get("authorization").ok_or_else(|| {
        AppError::Unauthorized(
            "Missing identity. Provide 'Authorization: Bearer <user id>'.".to_string(),
        )
    })?;
    let auth_str = auth
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header encoding".to_string()))?;
    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or_else(|| {
            AppError::Unauthorized(
                "Missing identity. Provide 'Authorization: Bearer <user id>'.".to_string(),
            )
        })
}

//! Conversation and message handlers for the REST surface.
//!
//! Listing routes go through the sentinel service and degrade to empty
//! results on storage faults; routes that address a single record go to
//! the repository directly so missing rows surface as 404.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use laichat_core::chat::repository::ConversationRepository;
use laichat_types::conversation::{Conversation, Message};

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::state::AppState;

/// Query parameters for conversation search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Rename body for PUT /api/conversations/{id}.
#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub title: String,
}

/// Edit body for PUT /api/messages/{id}.
#[derive(Debug, Deserialize)]
pub struct EditMessageRequest {
    pub content: String,
}

/// GET /api/conversations -- the caller's conversations, most recently
/// active first.
pub async fn list_conversations(
    State(state): State<AppState>,
    Identity(user_id): Identity,
) -> Json<Vec<Conversation>> {
    Json(state.conversations.conversations(&user_id).await)
}

/// GET /api/conversations/search?q= -- match by title and by message
/// content, merged and de-duplicated.
pub async fn search_conversations(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Conversation>>, AppError> {
    let q = query.q.as_deref().map(str::trim).unwrap_or_default();
    if q.is_empty() {
        return Err(AppError::Validation(
            "Query parameter 'q' is required".to_string(),
        ));
    }
    Ok(Json(
        state.conversations.search_conversations(&user_id, q).await,
    ))
}

/// GET /api/conversations/{id}/messages -- messages in chronological
/// order.
pub async fn list_messages(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, AppError> {
    resolve_owned(&state, &user_id, &id).await?;
    Ok(Json(state.conversations.messages(&id).await))
}

/// PUT /api/conversations/{id} -- rename.
pub async fn rename_conversation(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(id): Path<Uuid>,
    Json(body): Json<RenameRequest>,
) -> Result<Json<Conversation>, AppError> {
    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title must not be empty".to_string()));
    }

    resolve_owned(&state, &user_id, &id).await?;
    state.conversations.repo().update_title(&id, title).await?;

    let renamed = resolve_owned(&state, &user_id, &id).await?;
    Ok(Json(renamed))
}

/// DELETE /api/conversations/{id} -- delete; messages cascade.
pub async fn delete_conversation(
    State(state): State<AppState>,
    Identity(user_id): Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    resolve_owned(&state, &user_id, &id).await?;
    state.conversations.repo().delete_conversation(&id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// PUT /api/messages/{id} -- replace a message's content in place.
///
/// Addressed by message id alone; no edit history is kept.
pub async fn edit_message(
    State(state): State<AppState>,
    Identity(_user_id): Identity,
    Path(id): Path<Uuid>,
    Json(body): Json<EditMessageRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Content must not be empty".to_string(),
        ));
    }
    state
        .conversations
        .repo()
        .update_message_content(&id, &body.content)
        .await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}

/// Fetch a conversation and check it belongs to the caller.
///
/// A conversation owned by another user is reported as not found.
async fn resolve_owned(
    state: &AppState,
    user_id: &Uuid,
    id: &Uuid,
) -> Result<Conversation, AppError> {
    state
        .conversations
        .repo()
        .get_conversation(id)
        .await?
        .filter(|conversation| conversation.user_id == *user_id)
        .ok_or_else(|| AppError::NotFound(format!("Conversation '{id}' not found")))
}

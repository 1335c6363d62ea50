//! ConversationRepository trait definition.
//!
//! CRUD primitives for conversations and messages. The title/content
//! search halves are deliberately independent sub-queries; the service
//! layer merges and de-duplicates their results.

use laichat_types::conversation::{Conversation, Message};
use laichat_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in laichat-infra (e.g., `SqliteConversationRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ConversationRepository: Send + Sync {
    /// Create a new conversation.
    fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a conversation by its unique ID.
    fn get_conversation(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// List a user's conversations, ordered by updated_at DESC.
    fn list_conversations(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Replace a conversation's title.
    fn update_title(
        &self,
        id: &Uuid,
        title: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a conversation. Messages cascade via the schema.
    fn delete_conversation(
        &self,
        id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Save a new message and re-stamp the parent conversation's
    /// updated_at. The touch is a second, non-atomic write.
    fn save_message(
        &self,
        message: &Message,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get a conversation's messages, ordered by created_at ASC.
    fn get_messages(
        &self,
        conversation_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Replace a message's content in place. No edit history is kept.
    fn update_message_content(
        &self,
        id: &Uuid,
        content: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Case-insensitive substring match against a user's conversation titles.
    fn search_by_title(
        &self,
        user_id: &Uuid,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// Case-insensitive substring match against message content, resolved
    /// to the owning conversations and filtered to the given user.
    fn search_by_content(
        &self,
        user_id: &Uuid,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;
}

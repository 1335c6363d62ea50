//! Conversation service with the client-facing sentinel contract.
//!
//! Repositories return `Result`; this layer absorbs storage faults into
//! sentinel values (`None`, `false`, empty vec) and logs the detail,
//! because the chat experience must never block on durable storage. The
//! caller checks the sentinel, nothing here panics or propagates.

use std::collections::HashSet;

use chrono::Utc;
use laichat_types::conversation::{derive_title, Conversation, Message, Role};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::ConversationRepository;

/// Orchestrates conversation lifecycle and message persistence.
///
/// Generic over `ConversationRepository` to maintain clean architecture
/// (laichat-core never depends on laichat-infra).
pub struct ConversationService<R: ConversationRepository> {
    repo: R,
}

impl<R: ConversationRepository> ConversationService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Create a conversation for the given identity.
    ///
    /// `None` identity is a precondition failure, not an error: the
    /// attempt is refused before any store call. Storage failure also
    /// yields `None`.
    pub async fn create_conversation(
        &self,
        identity: Option<Uuid>,
        first_message: &str,
    ) -> Option<Conversation> {
        let user_id = identity?;
        let now = Utc::now();
        let conversation = Conversation {
            id: Uuid::now_v7(),
            user_id,
            title: derive_title(first_message),
            created_at: now,
            updated_at: now,
        };

        match self.repo.create_conversation(&conversation).await {
            Ok(()) => {
                info!(conversation_id = %conversation.id, "conversation created");
                Some(conversation)
            }
            Err(e) => {
                warn!(error = %e, "failed to create conversation");
                None
            }
        }
    }

    /// List the user's conversations, most recently active first.
    /// Returns an empty list on storage failure.
    pub async fn conversations(&self, user_id: &Uuid) -> Vec<Conversation> {
        match self.repo.list_conversations(user_id).await {
            Ok(conversations) => conversations,
            Err(e) => {
                warn!(error = %e, "failed to list conversations");
                Vec::new()
            }
        }
    }

    /// Messages of a conversation in chronological order. Empty on failure.
    pub async fn messages(&self, conversation_id: &Uuid) -> Vec<Message> {
        match self.repo.get_messages(conversation_id).await {
            Ok(messages) => messages,
            Err(e) => {
                warn!(conversation_id = %conversation_id, error = %e, "failed to fetch messages");
                Vec::new()
            }
        }
    }

    /// Persist a message and touch the parent conversation's updated_at.
    ///
    /// Returns the stored message (with its server-assigned id) or `None`
    /// on failure.
    pub async fn save_message(
        &self,
        conversation_id: Uuid,
        role: Role,
        content: String,
    ) -> Option<Message> {
        let message = Message {
            id: Uuid::now_v7(),
            conversation_id,
            role,
            content,
            created_at: Utc::now(),
        };

        match self.repo.save_message(&message).await {
            Ok(()) => Some(message),
            Err(e) => {
                warn!(conversation_id = %conversation_id, error = %e, "failed to save message");
                None
            }
        }
    }

    /// Replace a message's content in place.
    pub async fn update_message(&self, id: &Uuid, content: &str) -> bool {
        match self.repo.update_message_content(id, content).await {
            Ok(()) => true,
            Err(e) => {
                warn!(message_id = %id, error = %e, "failed to update message");
                false
            }
        }
    }

    /// Rename a conversation.
    pub async fn rename_conversation(&self, id: &Uuid, title: &str) -> bool {
        match self.repo.update_title(id, title).await {
            Ok(()) => true,
            Err(e) => {
                warn!(conversation_id = %id, error = %e, "failed to rename conversation");
                false
            }
        }
    }

    /// Delete a conversation; its messages cascade.
    pub async fn delete_conversation(&self, id: &Uuid) -> bool {
        match self.repo.delete_conversation(id).await {
            Ok(()) => {
                info!(conversation_id = %id, "conversation deleted");
                true
            }
            Err(e) => {
                warn!(conversation_id = %id, error = %e, "failed to delete conversation");
                false
            }
        }
    }

    /// Search a user's conversations by title and by message content.
    ///
    /// The two sub-queries run independently; their results are unioned
    /// here, de-duplicated by conversation id, and sorted by updated_at
    /// descending. Either half failing degrades to the other half rather
    /// than failing the search.
    pub async fn search_conversations(&self, user_id: &Uuid, query: &str) -> Vec<Conversation> {
        let by_title = match self.repo.search_by_title(user_id, query).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "title search failed");
                Vec::new()
            }
        };
        let by_content = match self.repo.search_by_content(user_id, query).await {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "content search failed");
                Vec::new()
            }
        };

        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut merged: Vec<Conversation> = Vec::with_capacity(by_title.len() + by_content.len());
        for conversation in by_title.into_iter().chain(by_content) {
            if seen.insert(conversation.id) {
                merged.push(conversation);
            }
        }
        merged.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryConversationRepository;

    fn service() -> ConversationService<MemoryConversationRepository> {
        ConversationService::new(MemoryConversationRepository::default())
    }

    #[tokio::test]
    async fn test_create_requires_identity() {
        let service = service();
        let created = service.create_conversation(None, "hello").await;
        assert!(created.is_none());
    }

    #[tokio::test]
    async fn test_create_derives_truncated_title() {
        let service = service();
        let long = "a".repeat(60);
        let conversation = service
            .create_conversation(Some(Uuid::now_v7()), &long)
            .await
            .unwrap();
        assert_eq!(conversation.title.chars().count(), 53);
        assert!(conversation.title.ends_with("..."));
    }

    #[tokio::test]
    async fn test_save_message_returns_stored_record() {
        let service = service();
        let user_id = Uuid::now_v7();
        let conversation = service
            .create_conversation(Some(user_id), "hi")
            .await
            .unwrap();

        let message = service
            .save_message(conversation.id, Role::User, "hi".to_string())
            .await
            .unwrap();
        assert_eq!(message.conversation_id, conversation.id);
        assert_eq!(message.role, Role::User);

        let messages = service.messages(&conversation.id).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, message.id);
    }

    #[tokio::test]
    async fn test_save_message_touches_conversation() {
        let service = service();
        let user_id = Uuid::now_v7();
        let conversation = service
            .create_conversation(Some(user_id), "hi")
            .await
            .unwrap();
        let before = conversation.updated_at;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service
            .save_message(conversation.id, Role::Model, "hello".to_string())
            .await
            .unwrap();

        let listed = service.conversations(&user_id).await;
        assert!(listed[0].updated_at > before);
    }

    #[tokio::test]
    async fn test_sentinels_on_storage_failure() {
        let repo = MemoryConversationRepository::default();
        repo.fail_writes(true);
        let service = ConversationService::new(repo);

        let created = service.create_conversation(Some(Uuid::now_v7()), "hi").await;
        assert!(created.is_none());

        assert!(!service.update_message(&Uuid::now_v7(), "x").await);
        assert!(!service.rename_conversation(&Uuid::now_v7(), "x").await);
        assert!(!service.delete_conversation(&Uuid::now_v7()).await);
        assert!(
            service
                .save_message(Uuid::now_v7(), Role::User, "x".to_string())
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_search_unions_and_dedupes() {
        let service = service();
        let user_id = Uuid::now_v7();

        // Title match only.
        let by_title = service
            .create_conversation(Some(user_id), "all about foobar")
            .await
            .unwrap();
        // Content match only.
        let by_content = service
            .create_conversation(Some(user_id), "unrelated")
            .await
            .unwrap();
        service
            .save_message(by_content.id, Role::User, "tell me about foobar".to_string())
            .await
            .unwrap();
        // Both halves match: must appear once.
        let both = service
            .create_conversation(Some(user_id), "foobar again")
            .await
            .unwrap();
        service
            .save_message(both.id, Role::Model, "foobar it is".to_string())
            .await
            .unwrap();
        // No match at all.
        service
            .create_conversation(Some(user_id), "nothing here")
            .await
            .unwrap();

        let results = service.search_conversations(&user_id, "FooBar").await;
        let ids: Vec<Uuid> = results.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&by_title.id));
        assert!(ids.contains(&by_content.id));
        assert!(ids.contains(&both.id));

        // Sorted by recency.
        for pair in results.windows(2) {
            assert!(pair[0].updated_at >= pair[1].updated_at);
        }
    }
}

//! In-memory test doubles shared by unit tests in this crate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use laichat_types::conversation::{Conversation, Message};
use laichat_types::error::RepositoryError;
use uuid::Uuid;

use crate::chat::repository::ConversationRepository;

/// Vec-backed `ConversationRepository` with injectable write failure.
#[derive(Default)]
pub struct MemoryConversationRepository {
    conversations: Mutex<Vec<Conversation>>,
    messages: Mutex<Vec<Message>>,
    fail_writes: AtomicBool,
}

impl MemoryConversationRepository {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn write_guard(&self) -> Result<(), RepositoryError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("write failure injected".to_string()));
        }
        Ok(())
    }
}

impl ConversationRepository for MemoryConversationRepository {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), RepositoryError> {
        self.write_guard()?;
        self.conversations
            .lock()
            .unwrap()
            .push(conversation.clone());
        Ok(())
    }

    async fn get_conversation(&self, id: &Uuid) -> Result<Option<Conversation>, RepositoryError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == *id)
            .cloned())
    }

    async fn list_conversations(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let mut out: Vec<Conversation> = self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(out)
    }

    async fn update_title(&self, id: &Uuid, title: &str) -> Result<(), RepositoryError> {
        self.write_guard()?;
        let mut conversations = self.conversations.lock().unwrap();
        match conversations.iter_mut().find(|c| c.id == *id) {
            Some(conversation) => {
                conversation.title = title.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete_conversation(&self, id: &Uuid) -> Result<(), RepositoryError> {
        self.write_guard()?;
        let mut conversations = self.conversations.lock().unwrap();
        let before = conversations.len();
        conversations.retain(|c| c.id != *id);
        if conversations.len() == before {
            return Err(RepositoryError::NotFound);
        }
        self.messages
            .lock()
            .unwrap()
            .retain(|m| m.conversation_id != *id);
        Ok(())
    }

    async fn save_message(&self, message: &Message) -> Result<(), RepositoryError> {
        self.write_guard()?;
        self.messages.lock().unwrap().push(message.clone());
        // Touch the parent, mirroring the two-write production behavior.
        if let Some(conversation) = self
            .conversations
            .lock()
            .unwrap()
            .iter_mut()
            .find(|c| c.id == message.conversation_id)
        {
            conversation.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn get_messages(&self, conversation_id: &Uuid) -> Result<Vec<Message>, RepositoryError> {
        let mut out: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.conversation_id == *conversation_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(out)
    }

    async fn update_message_content(&self, id: &Uuid, content: &str) -> Result<(), RepositoryError> {
        self.write_guard()?;
        let mut messages = self.messages.lock().unwrap();
        match messages.iter_mut().find(|m| m.id == *id) {
            Some(message) => {
                message.content = content.to_string();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn search_by_title(
        &self,
        user_id: &Uuid,
        query: &str,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let needle = query.to_lowercase();
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *user_id && c.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn search_by_content(
        &self,
        user_id: &Uuid,
        query: &str,
    ) -> Result<Vec<Conversation>, RepositoryError> {
        let needle = query.to_lowercase();
        let matching_ids: Vec<Uuid> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&needle))
            .map(|m| m.conversation_id)
            .collect();
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == *user_id && matching_ids.contains(&c.id))
            .cloned()
            .collect())
    }
}

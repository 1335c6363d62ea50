//! SQLite persistence for conversations, messages, and the profile.

pub mod conversation;
pub mod pool;
pub mod profile;

pub use conversation::SqliteConversationRepository;
pub use pool::DatabasePool;
pub use profile::SqliteProfileRepository;

//! Streaming chat session management.
//!
//! [`SessionController`] owns the in-memory turn list for one open
//! conversation and drives each submitted turn through a small state
//! machine: optimistic append, concurrent persistence, streamed response
//! assembly, and id reconciliation once the store confirms the writes.

use std::time::Duration;

use laichat_types::conversation::{Message, Role};
use uuid::Uuid;

pub mod controller;
pub mod decode;
pub mod transport;

pub use controller::SessionController;
pub use decode::Utf8Carry;
pub use transport::{ByteStream, CompletionTransport, TransportError};

/// Default wait for response headers before a turn is abandoned.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Session types
// ---------------------------------------------------------------------------

/// One entry in the controller's in-memory conversation view.
///
/// A turn is appended optimistically before the store confirms it, so it
/// carries a locally minted correlation `token` from birth and gains its
/// server `id` later, when the matching persistence write resolves.
#[derive(Debug, Clone)]
pub struct SessionTurn {
    /// Correlation token, unique per optimistic append.
    pub token: Uuid,
    /// Server-issued message id, once persisted.
    pub id: Option<Uuid>,
    pub role: Role,
    pub text: String,
}

impl SessionTurn {
    /// Create an unpersisted turn with a fresh correlation token.
    pub fn new(role: Role, text: String) -> Self {
        Self {
            token: Uuid::now_v7(),
            id: None,
            role,
            text,
        }
    }

    /// Rehydrate a turn from a message already in the store.
    pub fn from_message(message: &Message) -> Self {
        Self {
            token: Uuid::now_v7(),
            id: Some(message.id),
            role: message.role,
            text: message.content.clone(),
        }
    }
}

/// Where the controller currently is in the turn lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No turn in flight; submits are accepted.
    Idle,
    /// Request issued, waiting for response headers.
    Sending,
    /// Response body is being consumed chunk by chunk.
    Streaming,
    /// Stream finished; the final assistant message is being persisted.
    Settling,
    /// The last attempt failed; submits are accepted and clear the error.
    Errored,
}

/// Tunables for a chat session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long to wait for response headers before abandoning a turn.
    pub response_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }
}

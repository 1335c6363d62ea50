//! CompletionProvider trait definition.
//!
//! The abstraction over the external text-generation service. Uses RPITIT
//! for `complete`, and `Pin<Box<dyn Stream>>` for `stream_turn` so the
//! stream type stays object-safe at the gateway boundary.

use std::pin::Pin;

use futures_util::Stream;

use laichat_types::completion::{CompletionError, StreamEvent};
use laichat_types::turn::{Turn, TurnPayload};

/// Trait for completion service backends.
///
/// Implementations live in laichat-infra (e.g., `GeminiClient`). The
/// history handed to `stream_turn` must already be sanitized; providers
/// forward it as-is.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// One-shot completion for a bare prompt. Used by the quote flow.
    fn complete(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;

    /// Stream a chat turn: seed the service with `history`, submit
    /// `payload`, and yield text deltas as they arrive.
    fn stream_turn(
        &self,
        history: Vec<Turn>,
        payload: TurnPayload,
    ) -> Pin<Box<dyn Stream<Item = Result<StreamEvent, CompletionError>> + Send + 'static>>;
}

//! Error taxonomy shared across the workspace.
//!
//! Component boundaries convert lower-level faults into these types; no
//! error propagates to an end user as an unhandled fault. `SessionError`
//! carries the Lai-language strings shown verbatim in the client.

use thiserror::Error;

/// Errors from repository (storage) operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection failed")]
    Connection,

    #[error("query failed: {0}")]
    Query(String),

    #[error("record not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the chat session controller.
///
/// Every variant maps to a dismissable, localized user message; the
/// failed user turn stays in the transcript so its text can be offered
/// again on retry.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// The gateway did not begin responding within the turn budget.
    #[error("completion timed out")]
    Timeout,

    /// The gateway reported a missing credential. Not retryable by the
    /// user; only an operator can fix it.
    #[error("gateway configuration error: {0}")]
    Configuration(String),

    /// The upstream stream failed after output had started. Partial text
    /// is discarded.
    #[error("stream interrupted: {0}")]
    StreamInterrupted(String),

    /// The attempt was cancelled cooperatively.
    #[error("turn cancelled")]
    Cancelled,

    /// Anything else: transport failures, bad gateway responses.
    #[error("turn failed: {0}")]
    Failed(String),
}

impl SessionError {
    /// The Lai-language message rendered to the user.
    pub fn localized_message(&self) -> &'static str {
        match self {
            SessionError::Timeout => "Hngak khawh a rei deuhdeuh. Tivei hnih in i fel law.",
            SessionError::Configuration(_) => {
                "API key biafelmiam a um. Administrator ah a hriamhnak petu."
            }
            _ => "Biafelmiam a um. Tivei na fel bah law.",
        }
    }
}

/// Errors from quote generation.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("generation failed: {0}")]
    Generation(String),

    #[error("quote did not parse: {0}")]
    Parse(String),
}

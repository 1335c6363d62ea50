//! Transport seam between the session controller and the completion
//! gateway.
//!
//! The controller only needs headers-then-bytes semantics: `open`
//! resolves when the gateway has accepted the turn and response headers
//! have arrived, and the returned stream yields raw body chunks. The
//! HTTP implementation lives in laichat-infra.

use std::pin::Pin;

use futures_util::Stream;
use laichat_types::turn::ChatRequest;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Boxed stream of raw response body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, TransportError>> + Send + 'static>>;

/// Errors surfaced by a completion transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The gateway refused the turn because no provider credential is
    /// configured on the server.
    #[error("gateway is not configured: {0}")]
    Configuration(String),

    /// The gateway rejected the turn for any other reason.
    #[error("gateway rejected the turn: {0}")]
    Rejected(String),

    /// The gateway could not be reached at all.
    #[error("could not reach the gateway: {0}")]
    Connect(String),

    /// The response body failed mid-stream.
    #[error("response stream failed: {0}")]
    Stream(String),

    /// The turn was cancelled before it finished.
    #[error("turn cancelled")]
    Cancelled,
}

/// Opens streaming turns against a completion gateway.
pub trait CompletionTransport: Send + Sync {
    /// Open a streaming turn.
    ///
    /// Resolves once response headers have arrived. Implementations stop
    /// reading promptly when `cancel` fires.
    fn open(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
    ) -> impl std::future::Future<Output = Result<ByteStream, TransportError>> + Send;
}

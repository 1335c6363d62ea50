//! Streaming completion gateway.
//!
//! POST /api/chat
//!
//! The one route the chat client streams from. The body is parsed by
//! hand so a malformed request produces the gateway's flat
//! `{"error": string}` shape instead of the envelope used elsewhere.
//! Replies are raw concatenable text (`text/plain; charset=utf-8`) with
//! no framing. A mid-stream upstream failure aborts the body; the
//! already-sent prefix stands.

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use serde_json::json;

use laichat_core::provider::CompletionProvider;
use laichat_core::sanitize::sanitize_history;
use laichat_types::completion::{CompletionError, StreamEvent};
use laichat_types::turn::{ChatRequest, TurnPayload};

use crate::state::AppState;

/// POST /api/chat -- stream a completion for one chat turn.
///
/// No identity is required on this route; persistence is the client's
/// concern, the gateway only relays text.
pub async fn completion(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return gateway_error(format!("Invalid request body: {e}")),
    };

    // Fail closed before any upstream call when no credential was
    // resolvable at startup.
    let Some(provider) = state.provider.clone() else {
        return gateway_error("API Key missing".to_string());
    };

    let history = sanitize_history(request.history);
    let payload = TurnPayload::build(&request.message, request.files.as_deref());

    tracing::debug!(
        history_len = history.len(),
        has_files = request.files.is_some(),
        "opening completion stream"
    );

    let mut upstream = provider.stream_turn(history, payload);

    // Hold the response until the provider accepts the turn, so an
    // upstream refusal still gets a JSON error instead of an empty 200.
    match upstream.next().await {
        Some(Ok(StreamEvent::Connected)) => {}
        Some(Err(e)) => {
            tracing::warn!(error = %e, "completion request refused");
            return gateway_error(e.to_string());
        }
        _ => return gateway_error("provider closed the stream before connecting".to_string()),
    }

    let relay = async_stream::stream! {
        while let Some(event) = upstream.next().await {
            match event {
                Ok(StreamEvent::TextDelta { text }) => {
                    yield Ok::<_, CompletionError>(Bytes::from(text));
                }
                Ok(StreamEvent::Connected) => {}
                Ok(StreamEvent::Done) => break,
                Err(e) => {
                    tracing::error!(error = %e, "completion stream failed mid-relay");
                    yield Err(e);
                    break;
                }
            }
        }
    };

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(relay),
    )
        .into_response()
}

/// The gateway's own error shape: `{"error": string}` with a 500.
fn gateway_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
